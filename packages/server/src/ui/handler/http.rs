//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hearth_shared::time::millis_to_rfc3339;

use crate::{
    infrastructure::dto::http::{SessionListDto, SessionSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List the sessions currently in the registry
pub async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<SessionListDto> {
    let sessions: Vec<SessionSummaryDto> = state
        .registry
        .snapshot_for_broadcast()
        .await
        .into_iter()
        .map(|session| SessionSummaryDto {
            session_id: session.id.to_string(),
            connected_at: millis_to_rfc3339(session.connected_at.value()),
        })
        .collect();

    Json(SessionListDto {
        count: sessions.len(),
        sessions,
    })
}
