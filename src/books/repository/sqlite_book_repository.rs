use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::sqlite::{with_connection, SharedConnection};

pub(crate) const BOOK_COLUMNS: [&str; 5] = [
    "id INTEGER PRIMARY KEY AUTOINCREMENT",
    "title TEXT NOT NULL",
    "author TEXT NOT NULL",
    "isbn TEXT NOT NULL UNIQUE",
    "price REAL NOT NULL",
];

#[derive(Debug)]
pub struct SqliteBookRepository {
    conn: SharedConnection,
    table_name: String,
}

impl SqliteBookRepository {
    pub(crate) fn new(conn: SharedConnection, table_name: &str) -> Self {
        Self {
            conn,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for SqliteBookRepository {
    // isbn check and insert share one immediate transaction so concurrent
    // creates with the same isbn cannot both pass the check
    async fn create(&self, entity: &BookEntity) -> LibraryResult<i64> {
        let table_name = self.table_name.clone();
        let book = entity.clone();
        with_connection(&self.conn, move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            if isbn_exists(&tx, table_name.as_str(), book.isbn.as_str())? {
                return Err(LibraryError::duplicate_key(
                    format!("isbn already exists: {}", book.isbn).as_str()));
            }
            tx.execute(
                format!("INSERT INTO {} (title, author, isbn, price) VALUES (?1, ?2, ?3, ?4)", table_name).as_str(),
                params![book.title, book.author, book.isbn, book.price],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        }).await
    }

    // the isbn check is skipped when the row keeps its current isbn
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name = self.table_name.clone();
        let book = entity.clone();
        with_connection(&self.conn, move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let current_isbn: Option<String> = tx.query_row(
                format!("SELECT isbn FROM {} WHERE id = ?1", table_name).as_str(),
                params![book.book_id],
                |row| row.get(0),
            ).optional()?;
            match current_isbn {
                None => {
                    return Err(LibraryError::not_found(
                        format!("book not found for {}", book.book_id).as_str()));
                }
                Some(isbn) if isbn != book.isbn && isbn_exists(&tx, table_name.as_str(), book.isbn.as_str())? => {
                    return Err(LibraryError::duplicate_key(
                        format!("isbn already exists: {}", book.isbn).as_str()));
                }
                Some(_) => {}
            }
            let size = tx.execute(
                format!("UPDATE {} SET title = ?1, author = ?2, isbn = ?3, price = ?4 WHERE id = ?5", table_name).as_str(),
                params![book.title, book.author, book.isbn, book.price, book.book_id],
            )?;
            tx.commit()?;
            Ok(size)
        }).await
    }

    async fn get(&self, id: i64) -> LibraryResult<BookEntity> {
        let table_name = self.table_name.clone();
        with_connection(&self.conn, move |conn| {
            conn.query_row(
                format!("SELECT id, title, author, isbn, price FROM {} WHERE id = ?1", table_name).as_str(),
                params![id],
                map_to_book,
            ).optional()?
                .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
        }).await
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name = self.table_name.clone();
        with_connection(&self.conn, move |conn| {
            Ok(conn.execute(
                format!("DELETE FROM {} WHERE id = ?1", table_name).as_str(),
                params![id],
            )?)
        }).await
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let table_name = self.table_name.clone();
        with_connection(&self.conn, move |conn| {
            let mut stmt = conn.prepare(
                format!("SELECT id, title, author, isbn, price FROM {} ORDER BY id", table_name).as_str())?;
            let books = stmt.query_map([], map_to_book)?
                .collect::<Result<Vec<BookEntity>, rusqlite::Error>>()?;
            Ok(books)
        }).await
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_by_isbn(&self, isbn: &str) -> LibraryResult<BookEntity> {
        let table_name = self.table_name.clone();
        let isbn = isbn.to_string();
        with_connection(&self.conn, move |conn| {
            conn.query_row(
                format!("SELECT id, title, author, isbn, price FROM {} WHERE isbn = ?1", table_name).as_str(),
                params![isbn],
                map_to_book,
            ).optional()?
                .ok_or_else(|| LibraryError::not_found(format!("book not found for isbn {}", isbn).as_str()))
        }).await
    }

    async fn exists_by_isbn(&self, isbn: &str) -> LibraryResult<bool> {
        let table_name = self.table_name.clone();
        let isbn = isbn.to_string();
        with_connection(&self.conn, move |conn| {
            isbn_exists(conn, table_name.as_str(), isbn.as_str())
        }).await
    }
}

fn isbn_exists(conn: &Connection, table_name: &str, isbn: &str) -> LibraryResult<bool> {
    Ok(conn.query_row(
        format!("SELECT EXISTS(SELECT 1 FROM {} WHERE isbn = ?1)", table_name).as_str(),
        params![isbn],
        |row| row.get(0),
    )?)
}

fn map_to_book(row: &Row<'_>) -> rusqlite::Result<BookEntity> {
    Ok(BookEntity {
        book_id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        isbn: row.get("isbn")?,
        price: row.get("price")?,
    })
}
