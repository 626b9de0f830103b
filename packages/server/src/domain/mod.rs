//! Domain layer for the chat relay.
//!
//! This module contains the relay's core types (envelopes, sessions) and the
//! registry abstraction, independent of the wire format and the transport.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ClientSession, Envelope, SessionInbox};
pub use error::{RegistryError, ValueObjectError};
pub use factory::SessionIdFactory;
pub use repository::SessionRegistry;
pub use value_object::{PayloadKind, SessionId, Timestamp};

#[cfg(test)]
pub use repository::MockSessionRegistry;
