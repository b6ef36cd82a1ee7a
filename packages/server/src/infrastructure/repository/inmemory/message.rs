//! InMemory MessageLog 実装
//!
//! MessageHistory ドメインモデルを tokio の Mutex で保護して保持します。
//! 容量制限・削除・ページングはありません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageHistory, MessageLog};

/// インメモリ MessageLog 実装
#[derive(Default)]
pub struct InMemoryMessageLog {
    history: Mutex<MessageHistory>,
}

impl InMemoryMessageLog {
    /// 空の MessageLog を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append_message(&self, message: ChatMessage) {
        let mut history = self.history.lock().await;
        history.append(message);
    }

    async fn snapshot(&self) -> Vec<ChatMessage> {
        let history = self.history.lock().await;
        history.snapshot()
    }

    async fn count(&self) -> usize {
        let history = self.history.lock().await;
        history.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, ParticipantName};
    use std::sync::Arc;

    fn message(sender: &str, content: &str) -> ChatMessage {
        ChatMessage::new(ParticipantName::new(sender), MessageContent::new(content))
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        // テスト項目: m1, m2 の順に追加すると [m1, m2] が返る
        // given (前提条件):
        let log = InMemoryMessageLog::new();
        let m1 = message("Ayşe", "merhaba");
        let m2 = message("Mehmet", "selam");

        // when (操作):
        log.append_message(m1.clone()).await;
        log.append_message(m2.clone()).await;

        // then (期待する結果):
        assert_eq!(log.snapshot().await, vec![m1, m2]);
        assert_eq!(log.count().await, 2);
    }

    #[tokio::test]
    async fn test_empty_log_snapshot() {
        // テスト項目: 空のログのスナップショットは空
        // given (前提条件):
        let log = InMemoryMessageLog::new();

        // then (期待する結果):
        assert!(log.snapshot().await.is_empty());
        assert_eq!(log.count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_lose_no_updates() {
        // テスト項目: 同時に追加しても全てのメッセージが保持される
        // given (前提条件):
        let log = Arc::new(InMemoryMessageLog::new());

        // when (操作):
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let log = log.clone();
                tokio::spawn(async move {
                    log.append_message(message("bot", &i.to_string())).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(log.count().await, 50);
    }
}
