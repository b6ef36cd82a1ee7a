//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から BroadcastHub 経由で呼び出され、Domain 層を操作します。

pub mod hub;
pub mod join_room;
pub mod leave_room;
pub mod list_messages;
pub mod list_participants;
pub mod send_message;
pub mod sync_messages;

pub use hub::BroadcastHub;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_messages::ListMessagesUseCase;
pub use list_participants::ListParticipantsUseCase;
pub use send_message::SendMessageUseCase;
pub use sync_messages::SyncMessagesUseCase;
