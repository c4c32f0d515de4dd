//! Generic object factory.

use std::error::Error;
use std::fmt;

/// Error type for factory operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The target could not be constructed from the given props.
    CreationFailed(String),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::CreationFailed(msg) => {
                write!(f, "could not create instance: {}", msg)
            }
        }
    }
}

impl Error for FactoryError {}

/// Builds instances of `T` from construction props `P`.
///
/// The constructor is supplied as code, not discovered at runtime.
pub trait Factory<T, P>: Send + Sync {
    fn create(&self, props: P) -> Result<T, FactoryError>;
}

/// Adapter turning a closure into a [`Factory`].
pub struct FnFactory<F> {
    f: F,
}

impl<F> FnFactory<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<T, P, F> Factory<T, P> for FnFactory<F>
where
    F: Fn(P) -> Result<T, FactoryError> + Send + Sync,
{
    fn create(&self, props: P) -> Result<T, FactoryError> {
        (self.f)(props)
    }
}
