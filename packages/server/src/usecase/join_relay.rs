//! UseCase: セッション参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRelayUseCase::execute() メソッド
//! - セッションの生成と Registry への登録
//!
//! ### なぜこのテストが必要か
//! - 登録直後からブロードキャスト対象になることを保証
//! - 二重登録が拒否されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規セッションの参加
//! - 異常系：Registry が重複を報告した場合

use std::sync::Arc;

use crate::{
    domain::{
        ClientSession, RegistryError, SessionIdFactory, SessionInbox, SessionRegistry, Timestamp,
    },
    usecase::error::JoinError,
};

/// セッション参加のユースケース
pub struct JoinRelayUseCase {
    /// Registry（データアクセス層の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl JoinRelayUseCase {
    /// 新しい JoinRelayUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(SessionInbox)` - 登録済みセッションの受信キュー
    /// * `Err(JoinError)` - 登録失敗
    pub async fn execute(&self) -> Result<SessionInbox, JoinError> {
        let (session, inbox) = ClientSession::open(SessionIdFactory::generate(), Timestamp::now());

        self.registry
            .register(session)
            .await
            .map_err(|RegistryError::DuplicateSession(id)| JoinError::DuplicateSession(id))?;

        Ok(inbox)
    }
}
