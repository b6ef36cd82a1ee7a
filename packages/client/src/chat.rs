//! Client-side protocol state.
//!
//! `ChatClient` turns server frames and typed commands into [`Reaction`]s.
//! It never touches the socket or the terminal itself, which keeps the
//! seeding and join sequencing testable without a server.

use std::collections::HashMap;

use hearth_server::infrastructure::dto::websocket::{
    ChatMessageDto, HubMethod, InvocationMessage, ServerMessage,
};
use serde_json::{Value, json};

use crate::{
    command::Command,
    room::{LocalRoom, format_message},
};

/// Something the runner has to do on behalf of the client
#[derive(Debug, Clone)]
pub enum Reaction {
    /// Show a line to the user
    Print(String),
    /// Send a frame to the server
    Send(InvocationMessage),
    /// Close the connection and exit
    Quit,
}

#[derive(Debug)]
pub struct ChatClient {
    name: String,
    room: LocalRoom,
    next_invocation_id: u64,
    pending: HashMap<String, HubMethod>,
    participants_seeded: bool,
    messages_seeded: bool,
    join_sent: bool,
}

impl ChatClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            room: LocalRoom::default(),
            next_invocation_id: 1,
            pending: HashMap::new(),
            participants_seeded: false,
            messages_seeded: false,
            join_sent: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Frames sent right after connecting. `join` follows once both answer.
    pub fn seed(&mut self) -> Vec<InvocationMessage> {
        vec![
            self.invoke(HubMethod::ListParticipants, vec![]),
            self.invoke(HubMethod::ListMessages, vec![]),
        ]
    }

    fn invoke(&mut self, target: HubMethod, arguments: Vec<Value>) -> InvocationMessage {
        let invocation_id = self.next_invocation_id.to_string();
        self.next_invocation_id += 1;
        self.pending.insert(invocation_id.clone(), target);
        InvocationMessage::new(Some(invocation_id), target, arguments)
    }

    /// React to one text frame from the server
    pub fn handle_frame(&mut self, text: &str) -> Result<Vec<Reaction>, serde_json::Error> {
        let message: ServerMessage = serde_json::from_str(text)?;
        let reactions = match message {
            ServerMessage::Completion {
                invocation_id,
                result,
                error,
            } => self.handle_completion(invocation_id, result, error),
            ServerMessage::ParticipantJoined { name } => {
                let line = format!("* {} joined", name);
                self.room.participant_joined(name);
                vec![Reaction::Print(line)]
            }
            ServerMessage::ParticipantLeft { name } => {
                self.room.participant_left(&name);
                vec![Reaction::Print(format!("* {} left", name))]
            }
            ServerMessage::MessageAdded { message } => {
                let line = format_message(&message);
                self.room.message_added(message);
                vec![Reaction::Print(line)]
            }
            ServerMessage::MessageListSynced { messages } => {
                let mut reactions = history_lines(&messages);
                self.room.messages = messages;
                reactions.insert(
                    0,
                    Reaction::Print(format!("--- {} message(s) ---", self.room.messages.len())),
                );
                reactions
            }
        };
        Ok(reactions)
    }

    fn handle_completion(
        &mut self,
        invocation_id: String,
        result: Option<Value>,
        error: Option<String>,
    ) -> Vec<Reaction> {
        let Some(method) = self.pending.remove(&invocation_id) else {
            tracing::debug!("Completion for unknown invocation '{}'", invocation_id);
            return vec![];
        };
        if let Some(error) = error {
            return vec![Reaction::Print(format!(
                "! {} failed: {}",
                method.as_str(),
                error
            ))];
        }

        let mut reactions = Vec::new();
        let result = result.unwrap_or(Value::Null);
        match method {
            HubMethod::ListParticipants => {
                match serde_json::from_value::<Vec<String>>(result) {
                    Ok(participants) => self.room.participants = participants,
                    Err(e) => tracing::warn!("Unexpected participant list: {}", e),
                }
                self.participants_seeded = true;
            }
            HubMethod::ListMessages => {
                match serde_json::from_value::<Vec<ChatMessageDto>>(result) {
                    Ok(messages) => {
                        reactions.extend(history_lines(&messages));
                        self.room.messages = messages;
                    }
                    Err(e) => tracing::warn!("Unexpected message list: {}", e),
                }
                self.messages_seeded = true;
            }
            _ => {}
        }

        if self.participants_seeded && self.messages_seeded && !self.join_sent {
            self.join_sent = true;
            let join = self.invoke(HubMethod::Join, vec![json!(self.name)]);
            reactions.push(Reaction::Send(join));
        }
        reactions
    }

    /// React to one typed line
    pub fn handle_command(&mut self, command: Command) -> Vec<Reaction> {
        match command {
            Command::Say(content) => {
                let message = ChatMessageDto {
                    sender: self.name.clone(),
                    content,
                };
                let frame = self.invoke(HubMethod::SendMessage, vec![json!(message)]);
                vec![Reaction::Send(frame)]
            }
            Command::Who => {
                let line = if self.room.participants.is_empty() {
                    "* nobody is here".to_string()
                } else {
                    format!("* here: {}", self.room.participants.join(", "))
                };
                vec![Reaction::Print(line)]
            }
            Command::Sync => vec![Reaction::Send(
                self.invoke(HubMethod::RequestMessageSync, vec![]),
            )],
            Command::Quit => {
                let mut reactions = Vec::new();
                if self.join_sent {
                    let leave = self.invoke(HubMethod::Leave, vec![json!(self.name)]);
                    reactions.push(Reaction::Send(leave));
                }
                reactions.push(Reaction::Quit);
                reactions
            }
            Command::Nothing => vec![],
            Command::Unknown(input) => vec![Reaction::Print(format!(
                "! unknown command: {} (try /who, /sync, /quit)",
                input
            ))],
        }
    }
}

fn history_lines(messages: &[ChatMessageDto]) -> Vec<Reaction> {
    messages
        .iter()
        .map(|m| Reaction::Print(format_message(m)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(id: &str, result: Value) -> String {
        json!({"type": "completion", "invocation_id": id, "result": result}).to_string()
    }

    fn sent(reactions: &[Reaction]) -> Vec<&InvocationMessage> {
        reactions
            .iter()
            .filter_map(|r| match r {
                Reaction::Send(frame) => Some(frame),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_join_after_both_seed_completions() {
        // テスト項目: 参加者一覧と履歴の両方を受け取った後にだけ join を送る
        // given (前提条件):
        let mut client = ChatClient::new("Ayşe");
        let seed = client.seed();
        assert_eq!(seed[0].target, HubMethod::ListParticipants);
        assert_eq!(seed[1].target, HubMethod::ListMessages);

        // when (操作):
        let first = client
            .handle_frame(&completion("1", json!(["Mehmet"])))
            .unwrap();
        let second = client
            .handle_frame(&completion(
                "2",
                json!([{"sender": "Mehmet", "content": "selam"}]),
            ))
            .unwrap();

        // then (期待する結果):
        assert!(sent(&first).is_empty());
        let frames = sent(&second);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].target, HubMethod::Join);
        assert_eq!(frames[0].arguments, vec![json!("Ayşe")]);
        assert_eq!(client.room.participants, vec!["Mehmet".to_string()]);
        assert_eq!(client.room.messages.len(), 1);
    }

    #[test]
    fn test_seed_completions_in_any_order() {
        // テスト項目: 完了通知の順序が逆でも join は 1 回だけ送られる
        // given (前提条件):
        let mut client = ChatClient::new("a");
        client.seed();

        // when (操作):
        let first = client.handle_frame(&completion("2", json!([]))).unwrap();
        let second = client.handle_frame(&completion("1", json!([]))).unwrap();
        let third = client.handle_frame(&completion("1", json!([]))).unwrap();

        // then (期待する結果):
        assert!(sent(&first).is_empty());
        assert_eq!(sent(&second).len(), 1);
        assert!(third.is_empty());
    }

    #[test]
    fn test_events_update_local_room() {
        // テスト項目: プッシュされたイベントでローカルの状態が更新される
        // given (前提条件):
        let mut client = ChatClient::new("a");

        // when (操作):
        client
            .handle_frame(r#"{"type":"participant-joined","name":"b"}"#)
            .unwrap();
        client
            .handle_frame(r#"{"type":"message-added","message":{"sender":"b","content":"hi"}}"#)
            .unwrap();
        client
            .handle_frame(r#"{"type":"participant-left","name":"b"}"#)
            .unwrap();

        // then (期待する結果):
        assert!(client.room.participants.is_empty());
        assert_eq!(
            client.room.messages,
            vec![ChatMessageDto {
                sender: "b".to_string(),
                content: "hi".to_string(),
            }]
        );
    }

    #[test]
    fn test_sync_replaces_history() {
        // テスト項目: message-list-synced で履歴が置き換えられる
        // given (前提条件):
        let mut client = ChatClient::new("a");
        client
            .handle_frame(r#"{"type":"message-added","message":{"sender":"x","content":"stale"}}"#)
            .unwrap();

        // when (操作):
        let reactions = client
            .handle_frame(
                r#"{"type":"message-list-synced","messages":[{"sender":"a","content":"1"},{"sender":"b","content":"2"}]}"#,
            )
            .unwrap();

        // then (期待する結果):
        assert_eq!(client.room.messages.len(), 2);
        assert_eq!(reactions.len(), 3);
    }

    #[test]
    fn test_say_sends_message_from_own_name() {
        // テスト項目: 入力したテキストは自分の名前で send-message として送られる
        // given (前提条件):
        let mut client = ChatClient::new("Ayşe");

        // when (操作):
        let reactions = client.handle_command(Command::Say("merhaba".to_string()));

        // then (期待する結果):
        let frames = sent(&reactions);
        assert_eq!(frames[0].target, HubMethod::SendMessage);
        assert_eq!(
            frames[0].arguments,
            vec![json!({"sender": "Ayşe", "content": "merhaba"})]
        );
    }

    #[test]
    fn test_quit_leaves_only_after_join() {
        // テスト項目: join 前の /quit では leave を送らない
        // given (前提条件):
        let mut client = ChatClient::new("a");

        // when (操作):
        let reactions = client.handle_command(Command::Quit);

        // then (期待する結果):
        assert!(sent(&reactions).is_empty());
        assert!(matches!(reactions.last(), Some(Reaction::Quit)));
    }

    #[test]
    fn test_quit_after_join_sends_leave() {
        // テスト項目: join 後の /quit では自分の名前で leave を送る
        // given (前提条件):
        let mut client = ChatClient::new("a");
        client.seed();
        client.handle_frame(&completion("1", json!([]))).unwrap();
        client.handle_frame(&completion("2", json!([]))).unwrap();

        // when (操作):
        let reactions = client.handle_command(Command::Quit);

        // then (期待する結果):
        let frames = sent(&reactions);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].target, HubMethod::Leave);
        assert_eq!(frames[0].arguments, vec![json!("a")]);
    }

    #[test]
    fn test_error_completion_is_printed() {
        // テスト項目: エラーの completion は利用者に表示される
        // given (前提条件):
        let mut client = ChatClient::new("a");
        client.handle_command(Command::Sync);

        // when (操作):
        let reactions = client
            .handle_frame(r#"{"type":"completion","invocation_id":"1","error":"boom"}"#)
            .unwrap();

        // then (期待する結果):
        assert!(matches!(
            reactions.as_slice(),
            [Reaction::Print(line)] if line.contains("request-message-sync") && line.contains("boom")
        ));
    }
}
