//! Core domain model for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{DisplayName, SessionId, Timestamp};

/// One live client connection and its identity state.
///
/// The transport handle itself is deliberately kept out of this value; it is
/// owned by the pusher registry. A `Session` only carries the domain state:
/// identifier, optional write-once display name, connect time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session identifier, generated at connect time
    pub id: SessionId,
    /// User-chosen label; absent until the peer sets it, immutable once set
    pub display_name: Option<DisplayName>,
    /// Timestamp when the connection was established
    pub connected_at: Timestamp,
}

impl Session {
    /// Create a new, still-anonymous session
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name: None,
            connected_at,
        }
    }

    /// Whether the peer has declared a display name yet
    pub fn is_named(&self) -> bool {
        self.display_name.is_some()
    }

    /// Store the display name, once.
    ///
    /// Returns `true` if the name was stored, `false` if a name was already
    /// present (the write-once policy: the first name wins, silently).
    pub fn set_display_name(&mut self, name: DisplayName) -> bool {
        if self.display_name.is_some() {
            return false;
        }
        self.display_name = Some(name);
        true
    }
}
