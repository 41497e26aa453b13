use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookRequest};
use crate::books::validation::validate_book_request;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: i64,
    pub book: BookRequest,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: i64, book: BookRequest) -> Self {
        Self {
            book_id,
            book,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let details = validate_book_request(&req.book)?;
        self.catalog_service.update_book(req.book_id, &details).await
            .map_err(CommandError::from).map(UpdateBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use crate::books::dto::BookRequest;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::add_book_cmd::tests::CountingCatalog;
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_update_book() {
        let svc: Arc<dyn CatalogService> = Arc::from(factory::create_catalog_service(&Configuration::new(RepositoryStore::Memory))
            .await.expect("should build service"));
        let add_cmd = AddBookCommand::new(Arc::clone(&svc));
        let update_cmd = UpdateBookCommand::new(svc);

        let res = add_cmd.execute(AddBookCommandRequest::new(BookRequest::new("Dune", "Herbert", "9780441013593", 9.99)))
            .await.expect("should add book");
        let req = UpdateBookCommandRequest::new(res.book.book_id, BookRequest::new("Dune", "Frank Herbert", "9780441013593", 10.99));
        let updated = update_cmd.execute(req).await.expect("should update book");
        assert_eq!(res.book.book_id, updated.book.book_id);
        assert_eq!("Frank Herbert", updated.book.author.as_str());
        assert_eq!(10.99, updated.book.price);

        let missing = update_cmd.execute(UpdateBookCommandRequest::new(
            -1, BookRequest::new("Dune", "Herbert", "9780441013593", 9.99))).await;
        assert!(matches!(missing, Err(CommandError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_validate_before_calling_service() {
        let catalog = Arc::new(CountingCatalog::default());
        let cmd = UpdateBookCommand::new(catalog.clone());

        let mut req = BookRequest::new("Dune", "Herbert", "9780441013593", 9.99);
        req.title = Some("".to_string());
        let res = cmd.execute(UpdateBookCommandRequest::new(1, req)).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
        assert_eq!(0, catalog.calls.load(Ordering::SeqCst));
    }
}
