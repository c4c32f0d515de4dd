use std::error::Error;
use std::fmt;

/// Error type for repository operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A storage lock was poisoned.
    LockPoisoned(&'static str),
    /// No entity stored under this id.
    NotFound(String),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::LockPoisoned(operation) => {
                write!(f, "repository lock poisoned during {}", operation)
            }
            RepositoryError::NotFound(id) => write!(f, "entity not found: {}", id),
        }
    }
}

impl Error for RepositoryError {}
