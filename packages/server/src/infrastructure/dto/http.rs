//! HTTP API response DTOs for the chat application.

use serde::{Deserialize, Serialize};

/// Room overview for the `/api/room` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub participants: Vec<String>,
    pub message_count: usize,
    pub connected_sessions: usize,
    pub started_at: String, // ISO 8601
}
