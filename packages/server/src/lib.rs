//! Group-chat relay library.
//!
//! Every connected client holds one long-lived WebSocket (`GET /chat`); each
//! envelope a client sends is broadcast to every connected client, the sender
//! included.

pub mod common;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::RelayConfig;
pub use error::ServerError;
pub use ui::{run, serve};
