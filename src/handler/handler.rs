use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::message::{Message, Query};

use super::error::HandlerError;

/// Async contract for command and event handlers.
///
/// Implementations might include application services, projections, or the
/// resilience decorators in this module, which wrap another handler.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> Result<(), HandlerError>;
}

/// Async contract for query handlers.
///
/// The result is an erased `serde_json::Value`; the caller recovers the
/// concrete type at the call site.
#[async_trait]
pub trait QueryHandler: Send + Sync {
    async fn handle(&self, query: &Query) -> Result<Value, HandlerError>;
}

/// Adapter turning an async closure into a [`Handler`].
///
/// The closure receives an owned clone of the message, so the returned
/// future borrows nothing from the caller.
///
/// ## Example
///
/// ```ignore
/// let handler = FnHandler::new(|message: Message| async move {
///     println!("handled {}", message.id());
///     Ok(())
/// });
/// ```
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Message) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    async fn handle(&self, message: &Message) -> Result<(), HandlerError> {
        (self.f)(message.clone()).await
    }
}

/// Adapter turning an async closure into a [`QueryHandler`].
pub struct FnQueryHandler<F> {
    f: F,
}

impl<F> FnQueryHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> QueryHandler for FnQueryHandler<F>
where
    F: Fn(Query) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, HandlerError>> + Send,
{
    async fn handle(&self, query: &Query) -> Result<Value, HandlerError> {
        (self.f)(query.clone()).await
    }
}
