//! UseCase: セッション離脱処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRelayUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 離脱後はブロードキャスト対象から外れることを保証
//! - 二重の離脱が安全（no-op）であることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：セッションの離脱
//! - エッジケース：同じセッションの二重離脱
//! - エッジケース：最後のセッションの離脱

use std::sync::Arc;

use crate::domain::{SessionId, SessionRegistry};

/// セッション離脱のユースケース
pub struct LeaveRelayUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl LeaveRelayUseCase {
    /// 新しい LeaveRelayUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 離脱を実行
    ///
    /// # Returns
    ///
    /// セッションが登録されていて、今回削除された場合は `true`
    pub async fn execute(&self, session_id: &SessionId) -> bool {
        self.registry.unregister(session_id).await
    }

    /// 残りのセッション数を取得
    pub async fn count_remaining_sessions(&self) -> usize {
        self.registry.count().await
    }
}
