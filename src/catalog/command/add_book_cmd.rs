use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookRequest};
use crate::books::validation::validate_book_request;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) book: BookRequest,
}

impl AddBookCommandRequest {
    pub fn new(book: BookRequest) -> Self {
        Self {
            book,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let details = validate_book_request(&req.book)?;
        self.catalog_service.add_book(&details).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::books::dto::{BookDetails, BookDto, BookRequest};
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::core::repository::RepositoryStore;

    // CountingCatalog records calls and never touches a store
    #[derive(Default)]
    pub(crate) struct CountingCatalog {
        pub(crate) calls: AtomicUsize,
    }

    impl CountingCatalog {
        fn touch<T>(&self) -> LibraryResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LibraryError::runtime("not expected", None))
        }
    }

    #[async_trait]
    impl CatalogService for CountingCatalog {
        async fn find_all_books(&self) -> LibraryResult<Vec<BookDto>> { self.touch() }
        async fn find_book_by_id(&self, _id: i64) -> LibraryResult<BookDto> { self.touch() }
        async fn find_book_by_isbn(&self, _isbn: &str) -> LibraryResult<BookDto> { self.touch() }
        async fn add_book(&self, _details: &BookDetails) -> LibraryResult<BookDto> { self.touch() }
        async fn update_book(&self, _id: i64, _details: &BookDetails) -> LibraryResult<BookDto> { self.touch() }
        async fn remove_book(&self, _id: i64) -> LibraryResult<()> { self.touch() }
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let svc = factory::create_catalog_service(&Configuration::new(RepositoryStore::Memory))
            .await.expect("should build service");
        let cmd = AddBookCommand::new(Arc::from(svc));

        let res = cmd.execute(AddBookCommandRequest::new(BookRequest::new("Dune", "Herbert", "9780441013593", 9.99)))
            .await.expect("should add book");
        assert!(res.book.book_id > 0);
        assert_eq!("Dune", res.book.title.as_str());

        let dup = cmd.execute(AddBookCommandRequest::new(BookRequest::new("Dune", "Herbert", "9780441013593", 9.99))).await;
        assert!(matches!(dup, Err(CommandError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_validate_before_calling_service() {
        let catalog = Arc::new(CountingCatalog::default());
        let cmd = AddBookCommand::new(catalog.clone());

        let mut req = BookRequest::new("Dune", "Herbert", "9780441013593", 9.99);
        req.price = Some(-1.0);
        let res = cmd.execute(AddBookCommandRequest::new(req)).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
        assert_eq!(0, catalog.calls.load(Ordering::SeqCst));
    }
}
