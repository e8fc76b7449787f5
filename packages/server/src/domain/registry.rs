//! SessionRegistry trait definition.
//!
//! The registry owns the set of live sessions. The domain layer defines the
//! interface; the in-memory implementation lives in the infrastructure layer
//! (dependency inversion).

use async_trait::async_trait;

use super::{
    entity::Session,
    value_object::{DisplayName, SessionId},
};

/// Result of a display-name assignment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameAssignment {
    /// The name was stored; this session is now named
    Assigned,
    /// The session already had a name; nothing changed (write-once policy)
    AlreadyNamed,
    /// No live session with that id (closed or never existed)
    UnknownSession,
}

/// Registry of live sessions.
///
/// Invariant: a session id appears in the registry iff its connection is
/// currently open and has not yet been cleaned up after close/error.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Insert a freshly connected session.
    ///
    /// An id collision with a live session violates the uniqueness invariant
    /// and is fatal; implementations assert rather than recover.
    async fn insert(&self, session: Session);

    /// Assign the display name, honoring the write-once policy
    async fn assign_display_name(&self, session_id: &SessionId, name: DisplayName)
    -> NameAssignment;

    /// Look up a live session by id
    async fn get(&self, session_id: &SessionId) -> Option<Session>;

    /// Remove a session, returning it if it was still registered.
    ///
    /// Idempotent: removing an already-removed id returns `None`, not an
    /// error.
    async fn remove(&self, session_id: &SessionId) -> Option<Session>;

    /// Ids of all currently live sessions
    async fn session_ids(&self) -> Vec<SessionId>;

    /// Snapshot of all currently live sessions
    async fn sessions(&self) -> Vec<Session>;

    /// Number of currently live sessions
    async fn count(&self) -> usize;
}
