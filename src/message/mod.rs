//! Messages — the immutable records flowing through the bus.
//!
//! A [`Message`] carries identity, a type tag used as the dispatch key, an
//! informational status, opaque payload/metadata maps, and a creation
//! timestamp. [`Command`], [`Query`] and [`Event`] are disjoint wrappers
//! distinguished by role, not by shape; the bus applies different dispatch
//! rules to each.

mod error;
mod message;

pub use error::MessageError;
pub use message::{Command, Event, Message, MessageProps, MessageStatus, Query};
