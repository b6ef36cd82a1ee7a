//! Local copy of the room state, kept current from pushed events.

use hearth_server::infrastructure::dto::websocket::ChatMessageDto;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalRoom {
    pub participants: Vec<String>,
    pub messages: Vec<ChatMessageDto>,
}

impl LocalRoom {
    pub fn participant_joined(&mut self, name: String) {
        self.participants.push(name);
    }

    /// Mirrors the server: drops the first matching entry only
    pub fn participant_left(&mut self, name: &str) {
        if let Some(index) = self.participants.iter().position(|p| p == name) {
            self.participants.remove(index);
        }
    }

    pub fn message_added(&mut self, message: ChatMessageDto) {
        self.messages.push(message);
    }
}

/// Render one chat line
pub fn format_message(message: &ChatMessageDto) -> String {
    format!("{}: {}", message.sender, message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_left_removes_first_only() {
        // テスト項目: 同名の参加者がいる場合は最初の 1 件だけ削除する
        // given (前提条件):
        let mut room = LocalRoom::default();
        room.participant_joined("a".to_string());
        room.participant_joined("a".to_string());

        // when (操作):
        room.participant_left("a");

        // then (期待する結果):
        assert_eq!(room.participants, vec!["a".to_string()]);
    }

    #[test]
    fn test_format_message() {
        // テスト項目: メッセージは "送信者: 内容" の形式で表示される
        let message = ChatMessageDto {
            sender: "Ayşe".to_string(),
            content: "merhaba".to_string(),
        };
        assert_eq!(format_message(&message), "Ayşe: merhaba");
    }
}
