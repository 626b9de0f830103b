//! Server lifecycle: bind, serve, shut down.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::{
    common::net::outbound_local_ip,
    config::RelayConfig,
    domain::SessionRegistry,
    error::ServerError,
    infrastructure::repository::InMemorySessionRegistry,
    ui::{
        handler::{chat_handler, health_check, list_sessions},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the relay's router around an existing state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", get(chat_handler))
        .route("/api/health", get(health_check))
        .route("/api/sessions", get(list_sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until SIGINT or SIGTERM.
pub async fn run(config: RelayConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let local_ip = outbound_local_ip();
    println!("Starting chat relay on {}:{}", local_ip, config.port);
    println!("Invite your friends with this IP: {}", local_ip);
    tracing::info!("Listening on {}", addr);

    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// On shutdown the listener is released and every live stream is closed
/// without waiting for queued envelopes to drain.
pub async fn serve<F>(
    listener: TcpListener,
    config: RelayConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let registry = Arc::new(InMemorySessionRegistry::new());

    let state = Arc::new(AppState {
        registry: registry.clone(),
        max_frame_size: config.max_frame_size(),
        shutdown: shutdown_rx,
    });

    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Server stopping gracefully...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(ServerError::Serve)?;

    let sessions_left = registry.count().await;
    tracing::info!(sessions_left, "Server stopped");
    Ok(())
}
