use std::error::Error;
use std::fmt;

/// Error type for message construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// A required property was missing or empty.
    MissingProps(&'static str),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::MissingProps(prop) => {
                write!(f, "missing required message property: {}", prop)
            }
        }
    }
}

impl Error for MessageError {}
