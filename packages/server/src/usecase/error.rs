//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::SessionId;

/// 参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// 同じセッション ID が既に登録されている
    #[error("Session '{0}' is already registered")]
    DuplicateSession(SessionId),
}
