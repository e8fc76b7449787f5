//! MessagePusher trait definition.
//!
//! The domain layer defines the delivery interface it needs; the concrete
//! WebSocket implementation lives in the infrastructure layer (dependency
//! inversion).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::SessionId};

/// Channel handle through which serialized messages reach one client.
///
/// Sends are fire-and-forget: the relay never awaits delivery and applies no
/// backpressure.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Outbound message delivery interface.
///
/// Implementations own the session-id -> channel map. Per-recipient failures
/// during `broadcast` are isolated: one dead channel must not abort delivery
/// to the remaining recipients, and must not remove the entry (cleanup is
/// solely the disconnect path's job).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register the channel for a newly connected session
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// Drop the channel for a disconnected session (idempotent)
    async fn unregister_session(&self, session_id: &SessionId);

    /// Send a serialized message to a single session (point-to-point)
    async fn push_to(&self, session_id: &SessionId, content: &str)
    -> Result<(), MessagePushError>;

    /// Send a serialized message to every target session, isolating
    /// per-recipient failures
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
