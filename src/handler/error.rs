use std::error::Error;
use std::fmt;

/// Error type for handler invocations.
///
/// Decorators re-raise the wrapped handler's error verbatim after
/// exhausting their policy. The one exception is [`HandlerError::CircuitOpen`],
/// which signals "not attempted" rather than "attempted and failed".
#[derive(Debug)]
pub enum HandlerError {
    /// The circuit breaker rejected the call during an open cooldown
    /// window. The wrapped handler was not invoked.
    CircuitOpen,
    /// Business logic rejected the message.
    Rejected(String),
    /// A lock guarding decorator state was poisoned.
    LockPoisoned(&'static str),
    /// Other error from application handler code.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::CircuitOpen => write!(f, "circuit breaker is open"),
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::LockPoisoned(what) => write!(f, "lock poisoned: {}", what),
            HandlerError::Other(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl HandlerError {
    /// Wrap an arbitrary error as a handler failure.
    pub fn other(err: impl Error + Send + Sync + 'static) -> Self {
        HandlerError::Other(Box::new(err))
    }

    /// True when this is the breaker's fast-fail error.
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, HandlerError::CircuitOpen)
    }
}

/// Error type for invalid decorator policies, raised at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Retry interval must be greater than zero.
    ZeroInterval,
    /// Failure threshold must be greater than zero.
    ZeroFailureThreshold,
    /// Cooldown period must be greater than zero.
    ZeroCooldown,
    /// Reset timeout must be greater than zero.
    ZeroResetTimeout,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::ZeroInterval => write!(f, "retry interval must be a positive duration"),
            PolicyError::ZeroFailureThreshold => {
                write!(f, "failure threshold must be greater than zero")
            }
            PolicyError::ZeroCooldown => {
                write!(f, "cooldown period must be a positive duration")
            }
            PolicyError::ZeroResetTimeout => {
                write!(f, "reset timeout must be a positive duration")
            }
        }
    }
}

impl Error for PolicyError {}
