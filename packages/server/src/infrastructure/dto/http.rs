//! HTTP API response DTOs for the relay.

use serde::{Deserialize, Serialize};

/// Registry overview for the sessions endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListDto {
    pub count: usize,
    pub sessions: Vec<SessionSummaryDto>,
}

/// One registered session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub session_id: String,
    pub connected_at: String, // ISO 8601
}
