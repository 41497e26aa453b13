pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDetails, BookDto};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn find_all_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn add_book(&self, details: &BookDetails) -> LibraryResult<BookDto>;
    async fn update_book(&self, id: i64, details: &BookDetails) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: i64) -> LibraryResult<()>;
}
