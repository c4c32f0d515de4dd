use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;

use crate::handler::{Handler, QueryHandler};
use crate::message::{Command, Event, Query};

use super::error::BusError;
use super::middleware::{Middleware, Next, Terminal};

/// Central dispatcher for commands, queries, and events.
///
/// Handlers are registered against a message type string. Commands and
/// events accept multiple handlers per type (insertion-ordered); a query
/// type has at most one handler, and re-registration is rejected with
/// [`BusError::DuplicateQueryHandler`].
///
/// Registries sit behind `RwLock` so registration may race dispatch;
/// dispatch snapshots the relevant handlers under the read lock and never
/// holds it across an await point.
///
/// ## Example
///
/// ```ignore
/// let bus = MessageBus::new();
/// bus.register_command_handler("order.create", handler)?;
/// bus.send_command(&command).await?;
/// ```
pub struct MessageBus {
    command_handlers: RwLock<HashMap<String, Vec<Arc<dyn Handler>>>>,
    query_handlers: RwLock<HashMap<String, Arc<dyn QueryHandler>>>,
    event_handlers: RwLock<HashMap<String, Vec<Arc<dyn Handler>>>>,
    middleware: RwLock<Vec<Arc<dyn Middleware>>>,
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBus {
    pub fn new() -> Self {
        MessageBus {
            command_handlers: RwLock::new(HashMap::new()),
            query_handlers: RwLock::new(HashMap::new()),
            event_handlers: RwLock::new(HashMap::new()),
            middleware: RwLock::new(Vec::new()),
        }
    }

    /// Append a middleware to the chain.
    ///
    /// Order of registration is order of invocation; the first registered
    /// middleware runs outermost. The chain is shared by commands, queries,
    /// and events.
    pub fn use_middleware(&self, middleware: Arc<dyn Middleware>) -> Result<(), BusError> {
        self.middleware
            .write()
            .map_err(|_| BusError::LockPoisoned("middleware"))?
            .push(middleware);
        Ok(())
    }

    /// Add a handler to the list for a command type.
    pub fn register_command_handler(
        &self,
        command_type: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> Result<(), BusError> {
        self.command_handlers
            .write()
            .map_err(|_| BusError::LockPoisoned("command handlers"))?
            .entry(command_type.into())
            .or_default()
            .push(handler);
        Ok(())
    }

    /// Associate exactly one handler with a query type.
    ///
    /// Fails with [`BusError::DuplicateQueryHandler`] if the type already
    /// has a handler. Queries have a single authoritative responder;
    /// replacing one silently is treated as a wiring mistake.
    pub fn register_query_handler(
        &self,
        query_type: impl Into<String>,
        handler: Arc<dyn QueryHandler>,
    ) -> Result<(), BusError> {
        let query_type = query_type.into();
        let mut registry = self
            .query_handlers
            .write()
            .map_err(|_| BusError::LockPoisoned("query handlers"))?;

        if registry.contains_key(&query_type) {
            return Err(BusError::DuplicateQueryHandler(query_type));
        }
        registry.insert(query_type, handler);
        Ok(())
    }

    /// Add a handler to the list for an event type.
    pub fn register_event_handler(
        &self,
        event_type: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> Result<(), BusError> {
        self.event_handlers
            .write()
            .map_err(|_| BusError::LockPoisoned("event handlers"))?
            .entry(event_type.into())
            .or_default()
            .push(handler);
        Ok(())
    }

    /// Dispatch a command to all handlers registered for its type.
    ///
    /// Fails with [`BusError::NoCommandHandler`] before middleware runs if
    /// no handler is registered. The terminal action invokes all handlers
    /// together and awaits their collective completion; individual handler
    /// failures are logged and contained, so the caller observes success
    /// once every handler has been attempted.
    pub async fn send_command(&self, command: &Command) -> Result<(), BusError> {
        let handlers = {
            let registry = self
                .command_handlers
                .read()
                .map_err(|_| BusError::LockPoisoned("command handlers"))?;
            registry
                .get(command.message_type())
                .cloned()
                .unwrap_or_default()
        };

        if handlers.is_empty() {
            return Err(BusError::NoCommandHandler(
                command.message_type().to_string(),
            ));
        }

        let chain = self.middleware_snapshot()?;
        let terminal = Terminal::FanOut {
            handlers: &handlers,
            kind: "command",
        };
        Next::new(command.message(), &chain, terminal)
            .run()
            .await
            .map_err(BusError::Handler)
    }

    /// Dispatch a query to its single registered handler and return the
    /// handler's result.
    ///
    /// Fails with [`BusError::NoQueryHandler`] before middleware runs if no
    /// handler is registered. The handler's own failure propagates to the
    /// caller. If a middleware short-circuits the chain the query resolves
    /// to `Value::Null`.
    pub async fn send_query(&self, query: &Query) -> Result<Value, BusError> {
        let handler = {
            let registry = self
                .query_handlers
                .read()
                .map_err(|_| BusError::LockPoisoned("query handlers"))?;
            registry.get(query.message_type()).cloned()
        }
        .ok_or_else(|| BusError::NoQueryHandler(query.message_type().to_string()))?;

        let chain = self.middleware_snapshot()?;
        let slot = Mutex::new(None);
        let terminal = Terminal::Query {
            handler: &handler,
            query,
            slot: &slot,
        };
        Next::new(query.message(), &chain, terminal)
            .run()
            .await
            .map_err(BusError::Handler)?;

        let value = slot
            .lock()
            .ok()
            .and_then(|mut guard| guard.take())
            .unwrap_or(Value::Null);
        Ok(value)
    }

    /// Publish an event to all handlers subscribed to its type.
    ///
    /// Publishing to zero subscribers is not an error and runs no
    /// middleware. Otherwise the fan-out semantics match
    /// [`MessageBus::send_command`].
    pub async fn publish_event(&self, event: &Event) -> Result<(), BusError> {
        let handlers = {
            let registry = self
                .event_handlers
                .read()
                .map_err(|_| BusError::LockPoisoned("event handlers"))?;
            registry
                .get(event.message_type())
                .cloned()
                .unwrap_or_default()
        };

        if handlers.is_empty() {
            return Ok(());
        }

        let chain = self.middleware_snapshot()?;
        let terminal = Terminal::FanOut {
            handlers: &handlers,
            kind: "event",
        };
        Next::new(event.message(), &chain, terminal)
            .run()
            .await
            .map_err(BusError::Handler)
    }

    fn middleware_snapshot(&self) -> Result<Vec<Arc<dyn Middleware>>, BusError> {
        Ok(self
            .middleware
            .read()
            .map_err(|_| BusError::LockPoisoned("middleware"))?
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use crate::handler::{FnHandler, FnQueryHandler, HandlerError};
    use crate::message::Message;

    use super::*;

    fn command(command_type: &str) -> Command {
        Command::new(Message::create("c-1", command_type, Map::new()).unwrap())
    }

    fn query(query_type: &str) -> Query {
        Query::new(Message::create("q-1", query_type, Map::new()).unwrap())
    }

    #[tokio::test]
    async fn send_command_without_handler_fails() {
        let bus = MessageBus::new();
        let err = bus.send_command(&command("Missing")).await.unwrap_err();
        assert!(matches!(err, BusError::NoCommandHandler(t) if t == "Missing"));
    }

    #[tokio::test]
    async fn send_query_without_handler_fails() {
        let bus = MessageBus::new();
        let err = bus.send_query(&query("Missing")).await.unwrap_err();
        assert!(matches!(err, BusError::NoQueryHandler(t) if t == "Missing"));
    }

    #[tokio::test]
    async fn duplicate_query_registration_is_rejected() {
        let bus = MessageBus::new();
        let handler = || {
            Arc::new(FnQueryHandler::new(|_query: Query| async {
                Ok::<_, HandlerError>(json!(1))
            }))
        };

        bus.register_query_handler("GetThing", handler()).unwrap();
        let err = bus
            .register_query_handler("GetThing", handler())
            .unwrap_err();
        assert!(matches!(err, BusError::DuplicateQueryHandler(t) if t == "GetThing"));
    }

    #[tokio::test]
    async fn publish_event_without_subscribers_is_ok() {
        let bus = MessageBus::new();
        let event = Event::new(Message::create("e-1", "NothingHappened", Map::new()).unwrap());
        bus.publish_event(&event).await.unwrap();
    }

    #[tokio::test]
    async fn command_reaches_registered_handler() {
        let bus = MessageBus::new();
        bus.register_command_handler(
            "DoThing",
            Arc::new(FnHandler::new(|_message: Message| async {
                Ok::<_, HandlerError>(())
            })),
        )
        .unwrap();

        bus.send_command(&command("DoThing")).await.unwrap();
    }
}
