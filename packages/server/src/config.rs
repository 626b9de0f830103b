//! Relay configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::infrastructure::dto::websocket::frame_limit;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 50051;

/// Default maximum media payload per envelope (100 MiB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 100 * 1024 * 1024;

/// Configuration for the relay server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    /// Host to bind (default `0.0.0.0`).
    pub host: IpAddr,
    /// Port to bind (default `50051`).
    pub port: u16,
    /// Max media payload per envelope in bytes.
    pub max_message_size: usize,
}

impl RelayConfig {
    /// Address the listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// WebSocket message and frame limit needed to carry `max_message_size`
    /// bytes of media once base64 encoded.
    pub fn max_frame_size(&self) -> usize {
        frame_limit(self.max_message_size)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}
