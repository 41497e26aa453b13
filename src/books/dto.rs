use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    #[serde(rename = "id")]
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.book_id
    }
}

// BookRequest is the inbound create/update payload. Every field is optional on the
// wire so that missing values are reported by validation instead of the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
}

impl BookRequest {
    pub fn new(title: &str, author: &str, isbn: &str, price: f64) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            isbn: Some(isbn.to_string()),
            price: Some(price),
        }
    }
}

// BookDetails is a validated BookRequest
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
}

impl BookDetails {
    pub fn build_book(&self) -> BookEntity {
        BookEntity::new(self.title.as_str(), self.author.as_str(), self.isbn.as_str(), self.price)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::books::dto::{BookDetails, BookDto, BookRequest};

    #[tokio::test]
    async fn test_should_serialize_book_with_id() {
        let book = BookDto {
            book_id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            price: 9.99,
        };
        let value = serde_json::to_value(&book).expect("should serialize");
        assert_eq!(json!({"id": 7, "title": "Dune", "author": "Herbert", "isbn": "9780441013593", "price": 9.99}), value);
    }

    #[tokio::test]
    async fn test_should_parse_partial_request() {
        let req: BookRequest = serde_json::from_value(json!({"title": "Dune", "price": 1.5})).expect("should parse");
        assert_eq!(Some("Dune".to_string()), req.title);
        assert_eq!(None, req.author);
        assert_eq!(None, req.isbn);
        assert_eq!(Some(1.5), req.price);
    }

    #[tokio::test]
    async fn test_should_build_book_from_details() {
        let details = BookDetails {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "9780441013593".to_string(),
            price: 9.99,
        };
        let book = details.build_book();
        assert_eq!(0, book.book_id);
        assert_eq!(details.isbn, book.isbn);
        assert_eq!(details.price, book.price);
    }
}
