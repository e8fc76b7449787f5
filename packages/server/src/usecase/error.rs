//! UseCase layer error definitions.
//!
//! These are outcomes, not failures to surface: the relay's policy is to
//! drop the offending request silently and keep the connection. The UI layer
//! only logs them.

use thiserror::Error;

/// Outcomes of a rejected display-name assignment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetDisplayNameError {
    /// The session already has a name (write-once policy)
    #[error("Session '{0}' already has a display name")]
    AlreadyNamed(String),

    /// The session is not registered (closed or never existed)
    #[error("Session '{0}' is not registered")]
    UnknownSession(String),
}

/// Outcomes of a rejected chat send
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendChatError {
    /// The session has not declared a display name yet; anonymous chat is
    /// disallowed by policy
    #[error("Session '{0}' has no display name yet")]
    Anonymous(String),

    /// The session is not registered (closed or never existed)
    #[error("Session '{0}' is not registered")]
    UnknownSession(String),
}
