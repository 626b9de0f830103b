//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Session identifier value object.
///
/// Opaque identity of one live connection. Carries no meaning beyond
/// distinguishing one outbound queue from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a SessionId from an already generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a SessionId from its hyphenated string form.
    pub fn parse(id: &str) -> Result<Self, ValueObjectError> {
        Uuid::parse_str(id)
            .map(Self)
            .map_err(|_| ValueObjectError::SessionIdInvalidFormat(id.to_string()))
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload kind value object.
///
/// Either a content-type-like string describing real media (`image/png`,
/// `video/mp4`) or one of the reserved control tags. The relay never acts on
/// the value; it only carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayloadKind(String);

impl PayloadKind {
    /// Control tag for a sender's avatar update.
    pub const PROFILE_PICTURE: &'static str = "profile_picture";

    /// Control tag for a group picture update.
    pub const GROUP_PICTURE_UPDATE: &'static str = "group_picture_update";

    /// Create a new PayloadKind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The payload kind tag
    ///
    /// # Returns
    ///
    /// A Result containing the PayloadKind or an error if validation fails
    pub fn new(kind: String) -> Result<Self, ValueObjectError> {
        if kind.is_empty() {
            return Err(ValueObjectError::PayloadKindEmpty);
        }
        Ok(Self(kind))
    }

    /// Whether this is a reserved control tag rather than a media type.
    pub fn is_control(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::PROFILE_PICTURE | Self::GROUP_PICTURE_UPDATE
        )
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PayloadKind {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Timestamp for the current instant.
    pub fn now() -> Self {
        Self(hearth_shared::time::now_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
