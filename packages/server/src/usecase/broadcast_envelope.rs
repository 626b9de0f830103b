//! UseCase: エンベロープのブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastEnvelopeUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者自身を含む全セッションに配信されることを保証（エコーの扱いはクライアント側の方針）
//! - 配信は fire-and-forget で、受信側の writer を待たないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数セッションへの配信
//! - エッジケース：送信者のみが接続している場合（本人にだけ届く）
//! - エッジケース：誰も接続していない場合

use std::sync::Arc;

use crate::domain::{Envelope, SessionRegistry};

/// ブロードキャストのユースケース
#[derive(Clone)]
pub struct BroadcastEnvelopeUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl BroadcastEnvelopeUseCase {
    /// 新しい BroadcastEnvelopeUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// ブロードキャストを実行
    ///
    /// # Returns
    ///
    /// 配信できたセッション数
    pub async fn execute(&self, envelope: Envelope) -> usize {
        let envelope = Arc::new(envelope);
        let delivered = self.registry.broadcast(Arc::clone(&envelope)).await;

        tracing::debug!(
            sender = envelope.sender(),
            payload_kind = envelope.payload_kind().map(|k| k.as_str()),
            payload_len = envelope.payload().map_or(0, <[u8]>::len),
            delivered,
            "Broadcast round complete"
        );

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockSessionRegistry, PayloadKind},
        infrastructure::repository::InMemorySessionRegistry,
        usecase::JoinRelayUseCase,
    };

    #[tokio::test]
    async fn test_broadcast_reaches_every_session() {
        // テスト項目: 全セッション（送信者を含む）に同じエンベロープが届く
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let join = JoinRelayUseCase::new(registry.clone());
        let mut alice = join.execute().await.unwrap();
        let mut bob = join.execute().await.unwrap();
        let usecase = BroadcastEnvelopeUseCase::new(registry.clone());

        // when (操作):
        let envelope = Envelope::new(
            "alice".to_string(),
            Some("cat.png".to_string()),
            Some(vec![0x89, 0x50, 0x4e, 0x47]),
            Some(PayloadKind::new("image/png".to_string()).unwrap()),
        );
        let delivered = usecase.execute(envelope.clone()).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(*alice.try_dequeue().unwrap(), envelope);
        assert_eq!(*bob.try_dequeue().unwrap(), envelope);
    }

    #[tokio::test]
    async fn test_broadcast_sender_only() {
        // テスト項目: 送信者のみ接続時は本人にだけ届く
        let registry = Arc::new(InMemorySessionRegistry::new());
        let mut alice = JoinRelayUseCase::new(registry.clone())
            .execute()
            .await
            .unwrap();
        let usecase = BroadcastEnvelopeUseCase::new(registry);

        let delivered = usecase.execute(Envelope::text("alice", "echo")).await;

        assert_eq!(delivered, 1);
        assert_eq!(alice.try_dequeue().unwrap().text_body(), Some("echo"));
    }

    #[tokio::test]
    async fn test_broadcast_does_not_wait_for_slow_consumer() {
        // テスト項目: 受信側が読み出さなくてもブロードキャストは即座に完了する（無制限キュー）
        let registry = Arc::new(InMemorySessionRegistry::new());
        let stalled = JoinRelayUseCase::new(registry.clone())
            .execute()
            .await
            .unwrap();
        let usecase = BroadcastEnvelopeUseCase::new(registry);

        for i in 0..1000 {
            usecase
                .execute(Envelope::text("alice", format!("msg {i}")))
                .await;
        }

        assert_eq!(stalled.pending(), 1000);
    }

    #[tokio::test]
    async fn test_broadcast_delegates_to_registry() {
        // テスト項目: Registry の broadcast が 1 回だけ呼ばれ、その結果を返す
        // given (前提条件):
        let mut registry = MockSessionRegistry::new();
        registry
            .expect_broadcast()
            .withf(|envelope| envelope.text_body() == Some("hi"))
            .times(1)
            .returning(|_| 0);
        let usecase = BroadcastEnvelopeUseCase::new(Arc::new(registry));

        // when (操作):
        let delivered = usecase.execute(Envelope::text("nobody", "hi")).await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }
}
