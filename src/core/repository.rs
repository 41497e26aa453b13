use async_trait::async_trait;
use clap::ValueEnum;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity and return the id assigned by the store
    async fn create(&self, entity: &Entity) -> LibraryResult<i64>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: i64) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: i64) -> LibraryResult<usize>;

    // find all entities in store order
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
pub enum RepositoryStore {
    // file-backed sqlite database
    Sqlite,
    // private in-memory sqlite database, lost on shutdown
    Memory,
}
