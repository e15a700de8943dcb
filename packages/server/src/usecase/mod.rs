//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（イベントハンドラ）から呼び出され、Domain 層を操作します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod login;
pub mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, DisconnectError, LoginError, SendMessageError};
pub use login::LoginUseCase;
pub use send_message::SendMessageUseCase;
