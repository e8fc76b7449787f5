//! In-memory SessionRegistry implementation.
//!
//! A `HashMap` behind a `tokio::sync::Mutex` serves as the registry. Every
//! operation takes the lock for its full duration, so target selection for a
//! broadcast never observes a half-applied insert or remove.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DisplayName, NameAssignment, Session, SessionId, SessionRegistry};

/// In-memory session registry.
///
/// Owns the session map; display names are mutated through the registry and
/// nowhere else, keeping transport and domain state apart.
pub struct InMemorySessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.lock().await;
        let id = session.id.clone();
        let previous = sessions.insert(id.clone(), session);
        // Uniqueness invariant: a collision between random 128-bit ids is a
        // fatal invariant violation, not a recoverable error.
        assert!(
            previous.is_none(),
            "session id collision in registry: {}",
            id
        );
        tracing::debug!("Session '{}' inserted into registry", id);
    }

    async fn assign_display_name(
        &self,
        session_id: &SessionId,
        name: DisplayName,
    ) -> NameAssignment {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                if session.set_display_name(name) {
                    NameAssignment::Assigned
                } else {
                    NameAssignment::AlreadyNamed
                }
            }
            None => NameAssignment::UnknownSession,
        }
    }

    async fn get(&self, session_id: &SessionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned()
    }

    async fn remove(&self, session_id: &SessionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(session_id);
        if removed.is_some() {
            tracing::debug!("Session '{}' removed from registry", session_id);
        }
        removed
    }

    async fn session_ids(&self) -> Vec<SessionId> {
        let sessions = self.sessions.lock().await;
        sessions.keys().cloned().collect()
    }

    async fn sessions(&self) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        sessions.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
