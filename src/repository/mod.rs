//! Async repositories for domain entities.

mod error;
mod in_memory;
mod repository;

pub use error::RepositoryError;
pub use in_memory::InMemoryRepository;
pub use repository::{ReadRepository, Repository, WriteRepository};
