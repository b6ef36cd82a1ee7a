//! UseCase: 退出処理
//!
//! 名前が Registry に存在しなくても ParticipantLeft はブロードキャストされる。

use std::sync::Arc;

use crate::domain::{HubEvent, ParticipantName, PresenceRegistry, SessionNotifier};

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    presence: Arc<dyn PresenceRegistry>,
    notifier: Arc<dyn SessionNotifier>,
}

impl LeaveRoomUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>, notifier: Arc<dyn SessionNotifier>) -> Self {
        Self { presence, notifier }
    }

    /// 退出を実行
    ///
    /// # Returns
    ///
    /// ParticipantLeft を受け付けたセッション数
    pub async fn execute(&self, name: ParticipantName) -> usize {
        if !self.presence.remove_participant(&name).await {
            tracing::debug!("Leave for '{}' which is not in the roster", name);
        }
        self.notifier
            .broadcast(HubEvent::ParticipantLeft(name))
            .await
    }
}
