use std::net::SocketAddr;
use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use crate::core::repository::RepositoryStore;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

// ServerRuntime selects how the HTTP router is served
#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
pub enum ServerRuntime {
    // binds its own listener on `listen_addr`
    Standalone,
    // hands the router to the AWS Lambda HTTP adapter
    Lambda,
}

// Configuration abstracts config options for the bookshelf service
#[derive(Debug, PartialEq, Clone, Parser)]
#[command(name = "catalog", about = "Book catalog CRUD service")]
pub struct Configuration {
    /// Backing store for book rows.
    #[arg(long, env = "BOOKSHELF_STORE", value_enum, default_value = "sqlite")]
    pub store: RepositoryStore,

    /// SQLite database file, used when the store is `sqlite`.
    #[arg(long, env = "BOOKSHELF_DATABASE_PATH", default_value = "bookshelf.db")]
    pub database_path: PathBuf,

    /// Table holding book rows.
    #[arg(long, env = "BOOKSHELF_TABLE_NAME", default_value = "books")]
    pub table_name: String,

    /// Address to bind in standalone mode.
    #[arg(long, env = "BOOKSHELF_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    #[arg(long, env = "BOOKSHELF_RUNTIME", value_enum, default_value = "standalone")]
    pub runtime: ServerRuntime,
}

impl Configuration {
    pub fn new(store: RepositoryStore) -> Self {
        Configuration {
            store,
            database_path: PathBuf::from("bookshelf.db"),
            table_name: "books".to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            runtime: ServerRuntime::Standalone,
        }
    }
}
