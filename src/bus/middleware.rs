use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use tracing::warn;

use crate::handler::{Handler, HandlerError, QueryHandler};
use crate::message::{Message, Query};

/// An interceptor invoked for every dispatched message.
///
/// Middleware runs in registration order, first registered outermost, and
/// wraps the terminal dispatch action. Calling [`Next::run`] proceeds to
/// the next middleware or, at the end of the chain, to the registered
/// handler(s). A middleware that does not call `run` short-circuits the
/// dispatch entirely.
///
/// ## Example
///
/// ```ignore
/// struct Logging;
///
/// #[async_trait]
/// impl Middleware for Logging {
///     async fn call(&self, message: &Message, next: Next<'_>) -> Result<(), HandlerError> {
///         tracing::info!(message_type = %message.message_type(), "dispatching");
///         next.run().await
///     }
/// }
/// ```
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn call(&self, message: &Message, next: Next<'_>) -> Result<(), HandlerError>;
}

/// Terminal dispatch action at the end of the middleware chain.
#[derive(Clone, Copy)]
pub(crate) enum Terminal<'a> {
    /// Invoke all handlers together and contain individual failures.
    FanOut {
        handlers: &'a [Arc<dyn Handler>],
        kind: &'static str,
    },
    /// Invoke the single query handler and park its result in `slot`.
    Query {
        handler: &'a Arc<dyn QueryHandler>,
        query: &'a Query,
        slot: &'a Mutex<Option<Value>>,
    },
}

impl Terminal<'_> {
    async fn invoke(self, message: &Message) -> Result<(), HandlerError> {
        match self {
            Terminal::FanOut { handlers, kind } => {
                let results = join_all(handlers.iter().map(|h| h.handle(message))).await;
                for err in results.into_iter().filter_map(Result::err) {
                    warn!(
                        kind,
                        message_type = %message.message_type(),
                        error = %err,
                        "handler failed during fan-out"
                    );
                }
                Ok(())
            }
            Terminal::Query {
                handler,
                query,
                slot,
            } => {
                let value = handler.handle(query).await?;
                if let Ok(mut guard) = slot.lock() {
                    *guard = Some(value);
                }
                Ok(())
            }
        }
    }
}

/// Continuation handed to each middleware.
///
/// Walks the remaining chain as a slice, so long chains cost no call-stack
/// depth beyond one boxed frame per middleware.
pub struct Next<'a> {
    message: &'a Message,
    chain: &'a [Arc<dyn Middleware>],
    terminal: Terminal<'a>,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        message: &'a Message,
        chain: &'a [Arc<dyn Middleware>],
        terminal: Terminal<'a>,
    ) -> Self {
        Self {
            message,
            chain,
            terminal,
        }
    }

    /// Proceed to the next middleware, or to the terminal dispatch action
    /// when the chain is exhausted.
    pub async fn run(self) -> Result<(), HandlerError> {
        match self.chain.split_first() {
            Some((head, rest)) => {
                let next = Next {
                    message: self.message,
                    chain: rest,
                    terminal: self.terminal,
                };
                head.call(self.message, next).await
            }
            None => self.terminal.invoke(self.message).await,
        }
    }
}
