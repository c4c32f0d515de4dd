//! Message handlers and resilience decorators.
//!
//! [`Handler`] is the async contract for command and event handlers;
//! [`QueryHandler`] returns an erased `serde_json::Value` result.
//! [`RetryableHandler`] and [`CircuitBreakerHandler`] wrap any handler and
//! add fixed-interval retry and failure-threshold load shedding. Both are
//! themselves handlers, so they compose and register like any other.

mod circuit_breaker;
mod error;
mod handler;
mod retry;

pub use circuit_breaker::{CircuitBreakerHandler, CircuitBreakerPolicy, CircuitState};
pub use error::{HandlerError, PolicyError};
pub use handler::{FnHandler, FnQueryHandler, Handler, QueryHandler};
pub use retry::{RetryPolicy, RetryableHandler};
