//! UseCase: メッセージ履歴の同期要求
//!
//! 履歴全体を MessageListSynced として要求元のセッションにだけ送る。

use std::sync::Arc;

use crate::domain::{HubEvent, MessageLog, SessionId, SessionNotifier};

/// 履歴同期のユースケース
pub struct SyncMessagesUseCase {
    messages: Arc<dyn MessageLog>,
    notifier: Arc<dyn SessionNotifier>,
}

impl SyncMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageLog>, notifier: Arc<dyn SessionNotifier>) -> Self {
        Self { messages, notifier }
    }

    /// 同期を実行
    ///
    /// # Returns
    ///
    /// 要求元のキューが MessageListSynced を受け付けたかどうか
    pub async fn execute(&self, session_id: &SessionId) -> bool {
        let snapshot = self.messages.snapshot().await;
        self.notifier
            .send_to(session_id, HubEvent::MessageListSynced(snapshot))
            .await
    }
}
