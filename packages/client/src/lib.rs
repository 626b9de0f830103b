//! Terminal chat client for the Hearth relay.
//!
//! Connects to `/chat`, sends typed lines and files as envelopes, and prints
//! what other participants send.

pub mod app;
pub mod command;
pub mod error;
pub mod inbound;
pub mod media;

pub use app::{ClientArgs, run_client};
pub use error::ClientError;
