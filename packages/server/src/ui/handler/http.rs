//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use idobata_shared::time::timestamp_to_rfc3339;

use crate::infrastructure::dto::http::SessionSummaryDto;

use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint listing the live sessions (for diagnostics and testing)
pub async fn debug_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummaryDto>> {
    let sessions = state.get_sessions_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries: Vec<SessionSummaryDto> = sessions
        .into_iter()
        .map(|session| SessionSummaryDto {
            session_id: session.id.into_string(),
            display_name: session.display_name.map(|name| name.into_string()),
            connected_at: timestamp_to_rfc3339(session.connected_at.value()),
        })
        .collect();

    Json(summaries)
}
