use std::error::Error;
use std::fmt;

/// Error type for [`SpecificationBuilder`](super::SpecificationBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecificationError {
    /// A combinator or `build` was called before a seed specification was set.
    NotSet,
}

impl fmt::Display for SpecificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecificationError::NotSet => write!(f, "no specification set on builder"),
        }
    }
}

impl Error for SpecificationError {}
