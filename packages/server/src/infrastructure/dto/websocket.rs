//! WebSocket message DTOs and the envelope codec.
//!
//! One WebSocket message carries one envelope as JSON:
//!
//! ```json
//! {"username": "alice", "message": "hi", "media_data": "<base64>", "media_type": "image/png"}
//! ```
//!
//! Absent optional fields are omitted. Empty strings are read as absent, which
//! keeps clients that always send every field interoperable.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Envelope, PayloadKind, ValueObjectError};

/// Frame room reserved for everything except `media_data`: the JSON keys,
/// `username`, `message` and `media_type`.
pub const ENVELOPE_OVERHEAD: usize = 64 * 1024;

/// Largest frame that can carry a media payload of `max_payload` bytes.
///
/// `media_data` is base64, so every 3 payload bytes take 4 bytes on the wire.
pub fn frame_limit(max_payload: usize) -> usize {
    max_payload
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(ENVELOPE_OVERHEAD)
}

/// Errors raised while decoding or encoding a frame
#[derive(Debug, Error)]
pub enum CodecError {
    /// The frame is not a JSON envelope
    #[error("frame is not a valid envelope: {0}")]
    Json(#[from] serde_json::Error),

    /// A binary frame that is not UTF-8
    #[error("binary frame is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// `media_data` is not valid base64
    #[error("media_data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// `media_type` failed validation
    #[error("invalid media_type: {0}")]
    PayloadKind(#[from] ValueObjectError),
}

/// Chat envelope as it travels over the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEnvelope {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Base64 (standard alphabet, padded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = CodecError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        let payload = non_empty(wire.media_data)
            .map(|data| STANDARD.decode(data))
            .transpose()?;
        let payload_kind = non_empty(wire.media_type)
            .map(PayloadKind::new)
            .transpose()?;

        Ok(Envelope::new(
            wire.username,
            non_empty(wire.message),
            payload,
            payload_kind,
        ))
    }
}

impl From<&Envelope> for WireEnvelope {
    fn from(envelope: &Envelope) -> Self {
        Self {
            username: envelope.sender().to_string(),
            message: envelope.text_body().map(str::to_string),
            media_data: envelope.payload().map(|bytes| STANDARD.encode(bytes)),
            media_type: envelope.payload_kind().map(|kind| kind.as_str().to_string()),
        }
    }
}

/// Decode a text frame into an envelope.
pub fn decode_text(frame: &str) -> Result<Envelope, CodecError> {
    let wire: WireEnvelope = serde_json::from_str(frame)?;
    Envelope::try_from(wire)
}

/// Decode a binary frame (UTF-8 JSON) into an envelope.
pub fn decode_binary(frame: &[u8]) -> Result<Envelope, CodecError> {
    decode_text(std::str::from_utf8(frame)?)
}

/// Encode an envelope as a JSON text frame.
pub fn encode(envelope: &Envelope) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&WireEnvelope::from(envelope))?)
}
