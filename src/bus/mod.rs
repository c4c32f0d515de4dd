//! Message bus — type-keyed dispatch with a middleware chain.
//!
//! The bus decouples message producers from handlers via string-keyed
//! registries and enforces per-kind cardinality rules:
//!
//! ```text
//! send_command  ── one-or-more handlers, fan-out, failures contained
//! send_query    ── exactly one handler, its result (and failure) returned
//! publish_event ── zero-or-more handlers, fan-out, failures contained
//! ```
//!
//! A single [`Middleware`] chain is shared across all three kinds. Each
//! middleware receives the message and a [`Next`] continuation; not calling
//! `next.run()` short-circuits the whole dispatch.

mod bus;
mod error;
mod middleware;

pub use bus::MessageBus;
pub use error::BusError;
pub use middleware::{Middleware, Next};
