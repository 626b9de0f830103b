//! Server-level errors.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors that stop the relay process
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening port could not be bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
