//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - MessageLog への追加と MessageAdded のブロードキャスト
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト（送信者自身も含む）
//! - エッジケース：未参加のセッションからの送信（受け付ける）

use std::sync::Arc;

use crate::domain::{ChatMessage, HubEvent, MessageLog, SessionNotifier};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageLog>,
    notifier: Arc<dyn SessionNotifier>,
}

impl SendMessageUseCase {
    pub fn new(messages: Arc<dyn MessageLog>, notifier: Arc<dyn SessionNotifier>) -> Self {
        Self { messages, notifier }
    }

    /// メッセージ送信を実行
    ///
    /// 送信者が参加済みかどうかは確認しない。
    ///
    /// # Returns
    ///
    /// MessageAdded を受け付けたセッション数
    pub async fn execute(&self, message: ChatMessage) -> usize {
        self.messages.append_message(message.clone()).await;
        self.notifier
            .broadcast(HubEvent::MessageAdded(message))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessageContent, ParticipantName,
        repository::{MockMessageLog, MockSessionNotifier},
    };
    use mockall::{Sequence, predicate::eq};

    #[tokio::test]
    async fn test_send_message_appends_then_broadcasts() {
        // テスト項目: 追加してから MessageAdded を 1 回だけブロードキャストする
        // given (前提条件):
        let message = ChatMessage::new(ParticipantName::new("Ayşe"), MessageContent::new("merhaba"));
        let mut seq = Sequence::new();
        let mut log = MockMessageLog::new();
        log.expect_append_message()
            .with(eq(message.clone()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());
        let mut notifier = MockSessionNotifier::new();
        notifier
            .expect_broadcast()
            .with(eq(HubEvent::MessageAdded(message.clone())))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| 2);
        let usecase = SendMessageUseCase::new(Arc::new(log), Arc::new(notifier));

        // when (操作):
        let delivered = usecase.execute(message).await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
    }
}
