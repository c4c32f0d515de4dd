use std::ops::Deref;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::MessageError;

/// Lifecycle tag for a message. Informational only; the bus does not
/// enforce transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    Created,
    Committed,
}

/// Construction properties for a [`Message`].
#[derive(Debug, Clone)]
pub struct MessageProps {
    pub id: String,
    pub message_type: String,
    pub status: MessageStatus,
    pub payload: Map<String, Value>,
    pub metadata: Map<String, Value>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// An immutable message record.
///
/// Fields are private and there is no mutation API: once constructed a
/// message cannot change. The `message_type` string is the dispatch key
/// used by the bus registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    message_type: String,
    status: MessageStatus,
    payload: Map<String, Value>,
    metadata: Map<String, Value>,
    timestamp: u64,
}

impl Message {
    /// Create a message from explicit properties.
    ///
    /// Fails with [`MessageError::MissingProps`] when `id` or
    /// `message_type` is empty, or `timestamp` is zero.
    pub fn new(props: MessageProps) -> Result<Self, MessageError> {
        if props.id.is_empty() {
            return Err(MessageError::MissingProps("id"));
        }
        if props.message_type.is_empty() {
            return Err(MessageError::MissingProps("type"));
        }
        if props.timestamp == 0 {
            return Err(MessageError::MissingProps("timestamp"));
        }

        Ok(Message {
            id: props.id,
            message_type: props.message_type,
            status: props.status,
            payload: props.payload,
            metadata: props.metadata,
            timestamp: props.timestamp,
        })
    }

    /// Create a message stamped now, with `Created` status and no metadata.
    pub fn create(
        id: impl Into<String>,
        message_type: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Result<Self, MessageError> {
        Message::new(MessageProps {
            id: id.into(),
            message_type: message_type.into(),
            status: MessageStatus::Created,
            payload,
            metadata: Map::new(),
            timestamp: now_millis(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn message_type(&self) -> &str {
        &self.message_type
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

// Clocks before the epoch clamp to 1 so a freshly stamped message always
// passes the non-zero timestamp check.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
        .max(1)
}

macro_rules! message_wrapper {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub struct $name(Message);

        impl $name {
            pub fn new(message: Message) -> Self {
                Self(message)
            }

            pub fn message(&self) -> &Message {
                &self.0
            }

            pub fn into_message(self) -> Message {
                self.0
            }
        }

        impl Deref for $name {
            type Target = Message;

            fn deref(&self) -> &Message {
                &self.0
            }
        }

        impl From<Message> for $name {
            fn from(message: Message) -> Self {
                Self(message)
            }
        }
    };
}

message_wrapper! {
    /// A message representing an intent to perform a state-changing action.
    /// Dispatched to one-or-more handlers with best-effort fan-out.
    Command
}

message_wrapper! {
    /// A message requesting a computed result. Dispatched to exactly one
    /// handler whose result is returned to the caller.
    Query
}

message_wrapper! {
    /// A message representing a fact that has occurred. Dispatched to
    /// zero-or-more subscribers with best-effort fan-out.
    Event
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props() -> MessageProps {
        let mut payload = Map::new();
        payload.insert("some".to_string(), json!("value"));
        MessageProps {
            id: "msg-1".to_string(),
            message_type: "TestMessage".to_string(),
            status: MessageStatus::Created,
            payload,
            metadata: Map::new(),
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn construction_with_valid_props() {
        let message = Message::new(props()).unwrap();
        assert_eq!(message.id(), "msg-1");
        assert_eq!(message.message_type(), "TestMessage");
        assert_eq!(message.status(), MessageStatus::Created);
        assert_eq!(message.payload()["some"], json!("value"));
        assert_eq!(message.timestamp(), 1_700_000_000_000);
    }

    #[test]
    fn construction_rejects_empty_id() {
        let mut p = props();
        p.id = String::new();
        assert_eq!(Message::new(p), Err(MessageError::MissingProps("id")));
    }

    #[test]
    fn construction_rejects_empty_type() {
        let mut p = props();
        p.message_type = String::new();
        assert_eq!(Message::new(p), Err(MessageError::MissingProps("type")));
    }

    #[test]
    fn construction_rejects_zero_timestamp() {
        let mut p = props();
        p.timestamp = 0;
        assert_eq!(
            Message::new(p),
            Err(MessageError::MissingProps("timestamp"))
        );
    }

    #[test]
    fn create_stamps_now() {
        let message = Message::create("msg-2", "TestMessage", Map::new()).unwrap();
        assert!(message.timestamp() > 0);
        assert_eq!(message.status(), MessageStatus::Created);
        assert!(message.metadata().is_empty());
    }

    #[test]
    fn wrappers_deref_to_message() {
        let command = Command::new(Message::create("c-1", "DoThing", Map::new()).unwrap());
        assert_eq!(command.message_type(), "DoThing");
        assert_eq!(command.message().id(), "c-1");
    }
}
