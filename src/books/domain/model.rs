use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;

// BookEntity abstracts a catalog row; `book_id` is assigned by the store on insert
// and stays zero until then.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
}

impl BookEntity {
    pub fn new(title: &str, author: &str, isbn: &str, price: f64) -> Self {
        Self {
            book_id: 0,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            price,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::core::domain::Identifiable;

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookEntity::new("Dune", "Herbert", "9780441013593", 9.99);
        assert_eq!("Dune", book.title.as_str());
        assert_eq!("Herbert", book.author.as_str());
        assert_eq!("9780441013593", book.isbn.as_str());
        assert_eq!(0, book.id());
    }
}
