//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! HashMap を 1 つの Mutex で保護し、登録・削除・ブロードキャストを直列化します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientSession, Envelope, RegistryError, SessionId, SessionRegistry};

/// インメモリ Session Registry 実装
///
/// プロセスにつき 1 インスタンスを起動時に作成し、`Arc` で各ハンドラに共有します。
#[derive(Default)]
pub struct InMemorySessionRegistry {
    /// 接続中のセッション（送信キューの生産側を含む）
    sessions: Mutex<HashMap<SessionId, ClientSession>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(&self, session: ClientSession) -> Result<(), RegistryError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&session.id) {
            return Err(RegistryError::DuplicateSession(session.id));
        }
        tracing::debug!(session_id = %session.id, "Session registered");
        sessions.insert(session.id, session);
        Ok(())
    }

    async fn unregister(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Session unregistered");
        }
        removed
    }

    async fn snapshot_for_broadcast(&self) -> Vec<ClientSession> {
        let sessions = self.sessions.lock().await;
        let mut snapshot: Vec<ClientSession> = sessions.values().cloned().collect();
        snapshot.sort_by_key(|s| (s.connected_at, s.id));
        snapshot
    }

    async fn broadcast(&self, envelope: Arc<Envelope>) -> usize {
        // Enqueue never blocks, so the lock is held for the whole round.
        let sessions = self.sessions.lock().await;
        let mut delivered = 0;
        for session in sessions.values() {
            if session.enqueue(Arc::clone(&envelope)) {
                delivered += 1;
            } else {
                tracing::debug!(session_id = %session.id, "Skipping torn-down session");
            }
        }
        delivered
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
