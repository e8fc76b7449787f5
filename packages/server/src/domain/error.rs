//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Object validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// SessionId validation error
    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    /// SessionId invalid format error (not a valid UUID)
    #[error("SessionId must be a valid UUID format (got: {0})")]
    SessionIdInvalidFormat(String),

    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,
}

/// Errors surfaced by the message pusher
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// The target session has no registered channel
    #[error("Session '{0}' not found in pusher")]
    SessionNotFound(String),

    /// The underlying channel rejected the send
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
