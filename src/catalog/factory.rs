use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::utils::sqlite::build_connection;

pub async fn create_catalog_service(config: &Configuration) -> LibraryResult<Box<dyn CatalogService>> {
    let conn = build_connection(config)?;
    let book_repo = factory::create_book_repository(conn, config.table_name.as_str()).await?;
    Ok(Box::new(CatalogServiceImpl::new(book_repo)))
}
