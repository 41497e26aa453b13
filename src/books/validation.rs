use crate::books::dto::{BookDetails, BookRequest};
use crate::core::library::{FieldViolation, LibraryError, LibraryResult};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_AUTHOR_LEN: usize = 100;
pub const MAX_ISBN_LEN: usize = 20;

/// Checks a create/update payload and returns the normalized details.
///
/// Every violated constraint is reported, not only the first one. Lengths are
/// counted in characters.
pub fn validate_book_request(req: &BookRequest) -> LibraryResult<BookDetails> {
    let mut violations = Vec::new();
    let title = check_text("title", req.title.as_deref(), MAX_TITLE_LEN, &mut violations);
    let author = check_text("author", req.author.as_deref(), MAX_AUTHOR_LEN, &mut violations);
    let isbn = check_text("isbn", req.isbn.as_deref(), MAX_ISBN_LEN, &mut violations);
    let price = check_price(req.price, &mut violations);

    match (title, author, isbn, price) {
        (Some(title), Some(author), Some(isbn), Some(price)) => {
            Ok(BookDetails { title, author, isbn, price })
        }
        _ => Err(LibraryError::validation("invalid book request", violations)),
    }
}

fn check_text(field: &str, value: Option<&str>, max_len: usize,
              violations: &mut Vec<FieldViolation>) -> Option<String> {
    match value {
        None => {
            violations.push(FieldViolation::new(field, "must not be blank"));
            None
        }
        Some(text) if text.trim().is_empty() => {
            violations.push(FieldViolation::new(field, "must not be blank"));
            None
        }
        Some(text) if text.chars().count() > max_len => {
            violations.push(FieldViolation::new(
                field, format!("size must be between 1 and {}", max_len).as_str()));
            None
        }
        Some(text) => Some(text.to_string()),
    }
}

fn check_price(value: Option<f64>, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    match value {
        None => {
            violations.push(FieldViolation::new("price", "must not be null"));
            None
        }
        Some(price) if !price.is_finite() => {
            violations.push(FieldViolation::new("price", "must be a finite number"));
            None
        }
        Some(price) if price < 0.0 => {
            violations.push(FieldViolation::new("price", "must be greater than or equal to 0"));
            None
        }
        Some(price) => Some(price),
    }
}
