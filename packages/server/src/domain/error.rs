//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::SessionId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// SessionId is not a UUID
    #[error("SessionId must be a valid UUID format (got: {0})")]
    SessionIdInvalidFormat(String),

    /// PayloadKind validation error
    #[error("PayloadKind cannot be empty")]
    PayloadKindEmpty,
}

/// Errors related to the session registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A session with the same id is already registered
    #[error("Session '{0}' is already registered")]
    DuplicateSession(SessionId),
}
