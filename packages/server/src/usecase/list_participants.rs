//! UseCase: 参加者一覧の取得

use std::sync::Arc;

use crate::domain::{ParticipantName, PresenceRegistry};

/// 参加者一覧取得のユースケース
pub struct ListParticipantsUseCase {
    presence: Arc<dyn PresenceRegistry>,
}

impl ListParticipantsUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { presence }
    }

    /// 現在の参加者を参加順で返す。副作用なし。
    pub async fn execute(&self) -> Vec<ParticipantName> {
        self.presence.list_participants().await
    }
}
