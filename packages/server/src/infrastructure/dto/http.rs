//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

/// Session summary for the debug listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub session_id: String,
    /// Display name, absent while the session is still anonymous
    pub display_name: Option<String>,
    pub connected_at: String, // ISO 8601
}
