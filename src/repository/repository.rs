use async_trait::async_trait;

use super::error::RepositoryError;

/// Read side of a repository.
#[async_trait]
pub trait ReadRepository<T, Id>: Send + Sync {
    async fn find_by_id(&self, id: &Id) -> Result<Option<T>, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
    async fn exists(&self, id: &Id) -> Result<bool, RepositoryError>;
}

/// Write side of a repository.
#[async_trait]
pub trait WriteRepository<T, Id>: Send + Sync {
    /// Store the entity and return it.
    async fn save(&self, entity: T) -> Result<T, RepositoryError>;
    /// Remove this entity from storage. Fails with
    /// [`RepositoryError::NotFound`] when it is not stored.
    async fn delete(&self, entity: &T) -> Result<(), RepositoryError>;
    /// Remove the entity with this id. Fails with
    /// [`RepositoryError::NotFound`] when nothing is stored under it.
    async fn delete_by_id(&self, id: &Id) -> Result<(), RepositoryError>;
}

/// Combined read/write repository.
pub trait Repository<T, Id>: ReadRepository<T, Id> + WriteRepository<T, Id> {}

impl<T, Id, R> Repository<T, Id> for R where R: ReadRepository<T, Id> + WriteRepository<T, Id> {}
