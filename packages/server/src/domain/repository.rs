//! Session registry abstraction.
//!
//! The use case layer depends on this trait, not on a concrete store.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ClientSession, Envelope, RegistryError, SessionId};

/// The set of all currently connected sessions.
///
/// Membership changes and broadcast rounds are mutually exclusive: a round
/// reaches every session registered when it starts, and nothing is enqueued
/// onto a session once its `unregister` call has returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Insert a session. Rejects an id that is already registered.
    async fn register(&self, session: ClientSession) -> Result<(), RegistryError>;

    /// Remove a session. Returns whether it was present; removing an absent
    /// session is a no-op.
    async fn unregister(&self, id: &SessionId) -> bool;

    /// Current membership, ordered by connection time.
    async fn snapshot_for_broadcast(&self) -> Vec<ClientSession>;

    /// Run one broadcast round, returning how many sessions accepted the envelope.
    async fn broadcast(&self, envelope: Arc<Envelope>) -> usize;

    /// Number of registered sessions.
    async fn count(&self) -> usize;
}
