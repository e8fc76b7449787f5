//! Factory for generating session identifiers.

use uuid::Uuid;

use super::{error::ValueObjectError, value_object::SessionId};

/// Factory that mints fresh session identifiers.
///
/// Identifiers are random UUID v4. Uniqueness across live sessions is an
/// invariant, not something the relay checks: a collision between 128-bit
/// random identifiers is treated as a fatal invariant violation by the
/// registry rather than a recoverable error.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a fresh random SessionId
    pub fn generate() -> Result<SessionId, ValueObjectError> {
        SessionId::new(Uuid::new_v4().to_string())
    }
}
