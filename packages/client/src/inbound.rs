//! Presentation of envelopes received from the relay.
//!
//! The relay echoes every envelope back to its sender. Dropping our own
//! echoes and avatar updates is a client decision made here.

use hearth_server::domain::{Envelope, PayloadKind};

/// Whether an inbound envelope should be shown to this user.
pub fn should_display(envelope: &Envelope, own_username: &str) -> bool {
    if envelope.sender() == own_username {
        return false;
    }
    !matches!(
        envelope.payload_kind().map(PayloadKind::as_str),
        Some(PayloadKind::PROFILE_PICTURE)
    )
}

/// One display line for an envelope, prefixed with `clock`.
pub fn render(envelope: &Envelope, clock: &str) -> String {
    let sender = match envelope.sender() {
        "" => "system",
        name => name,
    };

    match (envelope.payload(), envelope.payload_kind()) {
        (Some(data), kind) => {
            let kind = kind.map_or("application/octet-stream", PayloadKind::as_str);
            let label = envelope.text_body().unwrap_or("attachment");
            format!("[{clock}] {sender} sent {label} ({kind}, {} bytes)", data.len())
        }
        (None, _) => format!(
            "[{clock}] {sender}: {}",
            envelope.text_body().unwrap_or_default()
        ),
    }
}
