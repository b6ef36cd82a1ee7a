//! UseCase: メッセージ履歴の取得

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageLog};

/// メッセージ履歴取得のユースケース
pub struct ListMessagesUseCase {
    messages: Arc<dyn MessageLog>,
}

impl ListMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageLog>) -> Self {
        Self { messages }
    }

    /// 全履歴を追加順で返す。ページングなし。
    pub async fn execute(&self) -> Vec<ChatMessage> {
        self.messages.snapshot().await
    }
}
