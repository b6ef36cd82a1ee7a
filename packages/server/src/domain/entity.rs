//! Core domain models for the chat application.
//!
//! `Roster` and `MessageHistory` are plain collections. Synchronization is
//! the job of the registries that own them.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageContent, ParticipantName};

/// Represents a chat message in the domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender's display name
    pub sender: ParticipantName,
    /// Message content
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(sender: ParticipantName, content: MessageContent) -> Self {
        Self { sender, content }
    }
}

/// Ordered list of participant names currently considered online.
///
/// Reflects the join/leave operations applied so far, not connection liveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<ParticipantName>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a name. Duplicates are kept.
    pub fn add(&mut self, name: ParticipantName) {
        self.participants.push(name);
    }

    /// Remove the first occurrence of `name`.
    ///
    /// Returns `false` when the name was not present.
    pub fn remove_first(&mut self, name: &ParticipantName) -> bool {
        match self.participants.iter().position(|p| p == name) {
            Some(index) => {
                self.participants.remove(index);
                true
            }
            None => false,
        }
    }

    /// Names in insertion order
    pub fn list(&self) -> &[ParticipantName] {
        &self.participants
    }
}

/// Append-only message history. Unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageHistory {
    messages: Vec<ChatMessage>,
}

impl MessageHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the tail
    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Point-in-time copy of every message in insertion order
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    /// Number of stored messages
    pub fn count(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ParticipantName {
        ParticipantName::new(s)
    }

    #[test]
    fn test_roster_new_is_empty() {
        // テスト項目: 新しい Roster は空
        // when (操作):
        let roster = Roster::new();

        // then (期待する結果):
        assert!(roster.list().is_empty());
    }

    #[test]
    fn test_roster_join_join_leave_keeps_order() {
        // テスト項目: a, b を追加して a を削除すると [b] が残る
        // given (前提条件):
        let mut roster = Roster::new();
        roster.add(name("a"));
        roster.add(name("b"));

        // when (操作):
        let removed = roster.remove_first(&name("a"));

        // then (期待する結果):
        assert!(removed);
        assert_eq!(roster.list(), &[name("b")]);
    }

    #[test]
    fn test_roster_remove_unknown_is_noop() {
        // テスト項目: 存在しない名前の削除は何も変更しない
        // given (前提条件):
        let mut roster = Roster::new();
        roster.add(name("a"));
        let before = roster.clone();

        // when (操作):
        let removed = roster.remove_first(&name("x"));

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_roster_accepts_duplicates_and_removes_first_only() {
        // テスト項目: 重複した名前を受け付け、削除は最初の 1 件のみ
        // given (前提条件):
        let mut roster = Roster::new();
        roster.add(name("a"));
        roster.add(name("b"));
        roster.add(name("a"));

        // when (操作):
        roster.remove_first(&name("a"));

        // then (期待する結果):
        assert_eq!(roster.list(), &[name("b"), name("a")]);
    }

    #[test]
    fn test_message_history_preserves_insertion_order() {
        // テスト項目: メッセージ履歴は追加順を保持する
        // given (前提条件):
        let mut history = MessageHistory::new();
        let m1 = ChatMessage::new(name("Ayşe"), MessageContent::new("merhaba"));
        let m2 = ChatMessage::new(name("Mehmet"), MessageContent::new("selam"));

        // when (操作):
        history.append(m1.clone());
        history.append(m2.clone());

        // then (期待する結果):
        assert_eq!(history.snapshot(), vec![m1, m2]);
        assert_eq!(history.count(), 2);
    }

    #[test]
    fn test_message_history_snapshot_is_detached() {
        // テスト項目: スナップショットは後続の追加の影響を受けない
        // given (前提条件):
        let mut history = MessageHistory::new();
        history.append(ChatMessage::new(name("a"), MessageContent::new("1")));
        let snapshot = history.snapshot();

        // when (操作):
        history.append(ChatMessage::new(name("a"), MessageContent::new("2")));

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.count(), 2);
    }
}
