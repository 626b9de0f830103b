//! Client error definitions.

use std::path::PathBuf;

use hearth_server::infrastructure::dto::websocket::CodecError;
use thiserror::Error;

/// Errors raised by the terminal client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not connect to or talk with the relay
    #[error("connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),

    /// The line editor failed
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// A file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file exceeds the upload limit
    #[error("{path} is {size} bytes, exceeding the {max} byte limit")]
    FileTooLarge { path: PathBuf, size: u64, max: u64 },

    /// An envelope could not be encoded
    #[error("failed to encode envelope: {0}")]
    Codec(#[from] CodecError),
}
