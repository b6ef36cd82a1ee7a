//! HTTP API endpoint handlers.
//!
//! Read-only views of the registries. All mutation goes through the
//! WebSocket hub.

use std::sync::Arc;

use axum::{Json, extract::State};
use hearth_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::{http::RoomSummaryDto, websocket::ChatMessageDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current roster in join order
pub async fn get_participants(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let participants = state.hub.list_participants().await;
    Json(
        participants
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
    )
}

/// Full message history
pub async fn get_messages(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessageDto>> {
    let messages = state.hub.list_messages().await;
    Json(messages.into_iter().map(ChatMessageDto::from).collect())
}

/// Room overview
pub async fn get_room(State(state): State<Arc<AppState>>) -> Json<RoomSummaryDto> {
    let participants = state.hub.list_participants().await;
    Json(RoomSummaryDto {
        participants: participants
            .into_iter()
            .map(|name| name.into_string())
            .collect(),
        message_count: state.hub.message_count().await,
        connected_sessions: state.hub.session_count().await,
        started_at: timestamp_to_jst_rfc3339(state.started_at),
    })
}
