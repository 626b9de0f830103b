//! Server state shared by every handler.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::SessionRegistry;

/// Shared application state
pub struct AppState {
    /// Registry（データアクセス層の抽象化）
    pub registry: Arc<dyn SessionRegistry>,
    /// Max WebSocket message and frame size in bytes
    pub max_frame_size: usize,
    /// Flips to `true` once the server starts shutting down
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    /// Resolve once shutdown has been signalled (or the signal sender is gone).
    pub async fn stopping(&self) {
        let mut shutdown = self.shutdown.clone();
        let _ = shutdown.wait_for(|stopping| *stopping).await;
    }
}
