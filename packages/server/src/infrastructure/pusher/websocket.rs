//! WebSocket-backed MessagePusher implementation.
//!
//! Owns the session-id -> `UnboundedSender` map. WebSocket creation happens
//! in the UI layer (`ui/handler/websocket.rs`); this implementation only
//! receives the already-created sender half and uses it for delivery. That
//! split keeps "accepting a connection" and "pushing a message" apart.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

/// MessagePusher over per-session unbounded channels.
///
/// A send into an `UnboundedSender` only fails once the receiving half is
/// gone, i.e. the connection is closing. Such entries are skipped with a
/// warning, never removed here: removal belongs to the disconnect path.
pub struct WebSocketMessagePusher {
    /// Sender halves of the per-session channels, keyed by session id
    sessions: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// Create a pusher with an empty session map
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.clone(), sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id);
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sessions = self.sessions.lock().await;

        if let Some(sender) = sessions.get(session_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to session '{}'", session_id);
            Ok(())
        } else {
            Err(MessagePushError::SessionNotFound(
                session_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sessions = self.sessions.lock().await;

        for target in targets {
            if let Some(sender) = sessions.get(&target) {
                // Per-recipient failures are tolerated during broadcast
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to session '{}': {}", target, e);
                } else {
                    tracing::debug!("Broadcasted message to session '{}'", target);
                }
            } else {
                tracing::warn!("Session '{}' not found during broadcast, skipping", target);
            }
        }

        Ok(())
    }
}
