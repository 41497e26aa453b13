use std::sync::{Arc, Mutex};
use std::time::Duration;
use rusqlite::{Connection, ErrorCode};
use tracing_subscriber::EnvFilter;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

pub type SharedConnection = Arc<Mutex<Connection>>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// helper method to open the configured sqlite database
pub fn build_connection(config: &Configuration) -> LibraryResult<SharedConnection> {
    let conn = match config.store {
        RepositoryStore::Sqlite => Connection::open(&config.database_path)?,
        RepositoryStore::Memory => Connection::open_in_memory()?,
    };
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(Arc::new(Mutex::new(conn)))
}

pub fn create_table(conn: &Connection, table_name: &str, columns: &[&str]) -> LibraryResult<()> {
    check_table_name(table_name)?;
    conn.execute_batch(
        format!("CREATE TABLE IF NOT EXISTS {} ({})", table_name, columns.join(", ")).as_str())
        .map_err(|err| LibraryError::database(
            format!("failed to create {} table due to {}", table_name, err).as_str(), None, false))
}

pub fn delete_table(conn: &Connection, table_name: &str) -> LibraryResult<()> {
    check_table_name(table_name)?;
    conn.execute_batch(format!("DROP TABLE IF EXISTS {}", table_name).as_str())?;
    Ok(())
}

// table names are interpolated into SQL so only plain identifiers are accepted
pub(crate) fn check_table_name(table_name: &str) -> LibraryResult<()> {
    let mut chars = table_name.chars();
    let valid = match chars.next() {
        Some(first) => (first.is_ascii_alphabetic() || first == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(LibraryError::runtime(format!("invalid table name {:?}", table_name).as_str(), None))
    }
}

// runs blocking sqlite work off the async workers while holding the connection lock
pub(crate) async fn with_connection<T, F>(conn: &SharedConnection, f: F) -> LibraryResult<T>
    where T: Send + 'static,
          F: FnOnce(&mut Connection) -> LibraryResult<T> + Send + 'static {
    let conn = Arc::clone(conn);
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.lock().map_err(|err| LibraryError::runtime(
            format!("sqlite connection lock poisoned {}", err).as_str(), None))?;
        f(&mut guard)
    }).await?
}

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        .json()
        .init();
}

impl From<rusqlite::Error> for LibraryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                LibraryError::not_found("sqlite query returned no rows")
            }
            rusqlite::Error::SqliteFailure(ref failure, ref message) => {
                let reason = Some(format!("{:?}", failure.code));
                let message = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.code {
                    ErrorCode::ConstraintViolation
                    if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                        LibraryError::duplicate_key(
                            format!("unique constraint failed {}", message).as_str())
                    }
                    ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                        LibraryError::database(
                            format!("sqlite database unavailable {}", message).as_str(), reason, true)
                    }
                    _ => {
                        LibraryError::database(
                            format!("sqlite database error {}", message).as_str(), reason, false)
                    }
                }
            }
            other => {
                LibraryError::database(format!("sqlite error {:?}", other).as_str(), None, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;
    use crate::utils::sqlite::{build_connection, check_table_name, create_table, delete_table, with_connection};

    const COLUMNS: [&str; 2] = ["id INTEGER PRIMARY KEY AUTOINCREMENT", "code TEXT NOT NULL UNIQUE"];

    #[tokio::test]
    async fn test_should_create_and_delete_table() {
        let conn = Connection::open_in_memory().expect("should open db");
        create_table(&conn, "codes", &COLUMNS).expect("should create table");
        // idempotent
        create_table(&conn, "codes", &COLUMNS).expect("should create table again");
        conn.execute("INSERT INTO codes (code) VALUES ('a')", []).expect("should insert");
        delete_table(&conn, "codes").expect("should delete table");
        assert!(conn.execute("INSERT INTO codes (code) VALUES ('a')", []).is_err());
    }

    #[tokio::test]
    async fn test_should_reject_bad_table_names() {
        assert!(check_table_name("books").is_ok());
        assert!(check_table_name("_books_2").is_ok());
        assert!(check_table_name("").is_err());
        assert!(check_table_name("2books").is_err());
        assert!(check_table_name("books; DROP TABLE x").is_err());
    }

    #[tokio::test]
    async fn test_should_map_unique_violation_to_duplicate_key() {
        let conn = Connection::open_in_memory().expect("should open db");
        create_table(&conn, "codes", &COLUMNS).expect("should create table");
        conn.execute("INSERT INTO codes (code) VALUES ('a')", []).expect("should insert");
        let err = conn.execute("INSERT INTO codes (code) VALUES ('a')", []).expect_err("should fail");
        assert!(matches!(LibraryError::from(err), LibraryError::DuplicateKey { .. }));
    }

    #[tokio::test]
    async fn test_should_map_no_rows_to_not_found() {
        let conn = Connection::open_in_memory().expect("should open db");
        let err = conn.query_row("SELECT 1 WHERE 1 = 0", [], |row| row.get::<_, i64>(0)).expect_err("should fail");
        assert!(matches!(LibraryError::from(err), LibraryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_should_run_with_connection() {
        let conn = build_connection(&Configuration::new(RepositoryStore::Memory)).expect("should open db");
        let answer = with_connection(&conn, |c| {
            Ok(c.query_row("SELECT 40 + 2", [], |row| row.get::<_, i64>(0))?)
        }).await.expect("should query");
        assert_eq!(42, answer);
    }
}
