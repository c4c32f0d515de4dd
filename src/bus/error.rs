use std::error::Error;
use std::fmt;

use crate::handler::HandlerError;

/// Error type for bus operations.
#[derive(Debug)]
pub enum BusError {
    /// No handler registered for this command type.
    NoCommandHandler(String),
    /// No handler registered for this query type.
    NoQueryHandler(String),
    /// A query handler is already registered for this type.
    DuplicateQueryHandler(String),
    /// A registry lock was poisoned.
    LockPoisoned(&'static str),
    /// A middleware or query handler failed during dispatch.
    Handler(HandlerError),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::NoCommandHandler(message_type) => {
                write!(f, "no handler registered for command type {}", message_type)
            }
            BusError::NoQueryHandler(message_type) => {
                write!(f, "no handler registered for query type {}", message_type)
            }
            BusError::DuplicateQueryHandler(message_type) => {
                write!(f, "handler already registered for query type {}", message_type)
            }
            BusError::LockPoisoned(what) => write!(f, "bus lock poisoned: {}", what),
            BusError::Handler(e) => write!(f, "dispatch failed: {}", e),
        }
    }
}

impl Error for BusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BusError::Handler(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HandlerError> for BusError {
    fn from(err: HandlerError) -> Self {
        BusError::Handler(err)
    }
}
