use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDetails, BookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::{LibraryError, LibraryResult};

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn find_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        debug!(count = books.len(), "listed books");
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.book_repository.find_by_isbn(isbn).await.map(|b| BookDto::from(&b))
    }

    async fn add_book(&self, details: &BookDetails) -> LibraryResult<BookDto> {
        if self.book_repository.exists_by_isbn(details.isbn.as_str()).await? {
            warn!(isbn = details.isbn.as_str(), "rejected book with duplicate isbn");
            return Err(LibraryError::duplicate_key(
                format!("isbn already exists: {}", details.isbn).as_str()));
        }
        let mut book = details.build_book();
        book.book_id = self.book_repository.create(&book).await?;
        info!(book_id = book.book_id, isbn = book.isbn.as_str(), "added book");
        Ok(BookDto::from(&book))
    }

    // the isbn check only runs when the isbn changes
    async fn update_book(&self, id: i64, details: &BookDetails) -> LibraryResult<BookDto> {
        let existing = self.book_repository.get(id).await?;
        if existing.isbn != details.isbn
            && self.book_repository.exists_by_isbn(details.isbn.as_str()).await? {
            warn!(book_id = id, isbn = details.isbn.as_str(), "rejected update with duplicate isbn");
            return Err(LibraryError::duplicate_key(
                format!("isbn already exists: {}", details.isbn).as_str()));
        }
        let mut book = details.build_book();
        book.book_id = existing.book_id;
        if self.book_repository.update(&book).await? == 0 {
            return Err(LibraryError::not_found(format!("book not found for {}", id).as_str()));
        }
        info!(book_id = id, isbn = book.isbn.as_str(), "updated book");
        Ok(BookDto::from(&book))
    }

    async fn remove_book(&self, id: i64) -> LibraryResult<()> {
        if self.book_repository.delete(id).await? == 0 {
            return Err(LibraryError::not_found(format!("book not found for {}", id).as_str()));
        }
        info!(book_id = id, "removed book");
        Ok(())
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            price: other.price,
        }
    }
}
