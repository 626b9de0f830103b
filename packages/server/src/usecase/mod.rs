//! UseCase 層
//!
//! リレーの振る舞いを実装するレイヤー。
//! UI 層から呼び出され、Domain 層の SessionRegistry を操作します。

pub mod broadcast_envelope;
pub mod error;
pub mod join_relay;
pub mod leave_relay;

pub use broadcast_envelope::BroadcastEnvelopeUseCase;
pub use error::JoinError;
pub use join_relay::JoinRelayUseCase;
pub use leave_relay::LeaveRelayUseCase;
