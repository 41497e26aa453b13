use crate::books::repository::BookRepository;
use crate::books::repository::sqlite_book_repository::{SqliteBookRepository, BOOK_COLUMNS};
use crate::core::library::LibraryResult;
use crate::utils::sqlite::{create_table, with_connection, SharedConnection};

pub(crate) async fn create_book_repository(conn: SharedConnection, table_name: &str) -> LibraryResult<Box<dyn BookRepository>> {
    let table = table_name.to_string();
    with_connection(&conn, move |c| create_table(c, table.as_str(), &BOOK_COLUMNS)).await?;
    Ok(Box::new(SqliteBookRepository::new(conn, table_name)))
}
