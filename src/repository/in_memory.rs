use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::entity::Entity;

use super::error::RepositoryError;
use super::repository::{ReadRepository, WriteRepository};

/// Map-backed repository for tests and single-process composition.
///
/// Entities are keyed by their [`Entity::id`]. Cloning the repository
/// clones the handle, not the storage.
#[derive(Clone)]
pub struct InMemoryRepository<T: Entity> {
    storage: Arc<RwLock<HashMap<T::Id, T>>>,
}

impl<T> Default for InMemoryRepository<T>
where
    T: Entity,
    T::Id: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryRepository<T>
where
    T: Entity,
    T::Id: Eq + Hash,
{
    pub fn new() -> Self {
        InMemoryRepository {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<T> ReadRepository<T, T::Id> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync,
    T::Id: Eq + Hash + Clone + Debug + Send + Sync,
{
    async fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(storage.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(storage.values().cloned().collect())
    }

    async fn exists(&self, id: &T::Id) -> Result<bool, RepositoryError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(storage.contains_key(id))
    }
}

#[async_trait]
impl<T> WriteRepository<T, T::Id> for InMemoryRepository<T>
where
    T: Entity + Clone + Send + Sync,
    T::Id: Eq + Hash + Clone + Debug + Send + Sync,
{
    async fn save(&self, entity: T) -> Result<T, RepositoryError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;
        storage.insert(entity.id().clone(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        self.delete_by_id(entity.id()).await
    }

    async fn delete_by_id(&self, id: &T::Id) -> Result<(), RepositoryError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;
        match storage.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(format!("{:?}", id))),
        }
    }
}
