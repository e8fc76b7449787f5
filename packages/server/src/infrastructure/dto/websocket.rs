//! WebSocket wire-format DTOs for the chat relay.
//!
//! Client -> server:
//! - `{ "type": "setUsername", "username": string }`
//! - `{ "type": "chat", "message": string }`
//!
//! Server -> client (all one shape):
//! - `{ "type": "system" | "chat", "message": string, "sender"?: string,
//!   "timeStamp": number }`
//!
//! `sender` is present only on chat messages; `timeStamp` is Unix epoch
//! milliseconds, assigned by the server.

use serde::{Deserialize, Serialize};

/// Inbound message from a client, discriminated by the `type` field.
///
/// Payloads with an unrecognized `type` or invalid structure fail to parse
/// and are discarded by the handler (the "ignore unknown input" policy).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Declare the display name for this session (accepted once)
    SetUsername { username: String },
    /// Send a chat line to everyone else
    Chat { message: String },
}

/// Kind discriminator for outbound messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Server-originated notice (welcome, join, leave)
    System,
    /// User-originated message, attributed to a sender
    Chat,
}

/// Outbound message to a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerMessage {
    pub r#type: MessageKind,
    pub message: String,
    /// Display name of the originating user; only on chat messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Unix timestamp (milliseconds since epoch), server-assigned
    #[serde(rename = "timeStamp")]
    pub time_stamp: i64,
}

impl ServerMessage {
    /// Build a system notice (no sender)
    pub fn system(message: impl Into<String>, time_stamp: i64) -> Self {
        Self {
            r#type: MessageKind::System,
            message: message.into(),
            sender: None,
            time_stamp,
        }
    }

    /// Build a chat message attributed to `sender`
    pub fn chat(message: impl Into<String>, sender: impl Into<String>, time_stamp: i64) -> Self {
        Self {
            r#type: MessageKind::Chat,
            message: message.into(),
            sender: Some(sender.into()),
            time_stamp,
        }
    }
}
