//! WebSocket message DTOs for the chat application.
//!
//! Every frame is a JSON object carrying a kebab-case `type`. Clients send
//! `invocation` frames; the server answers with `completion` frames and
//! pushes hub events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ChatMessage, HubEvent, MessageContent, ParticipantName};

/// Message type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Invocation,
    Completion,
    ParticipantJoined,
    ParticipantLeft,
    MessageAdded,
    MessageListSynced,
}

/// Remote operations a client may invoke on the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HubMethod {
    ListParticipants,
    Join,
    Leave,
    ListMessages,
    SendMessage,
    RequestMessageSync,
}

impl HubMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            HubMethod::ListParticipants => "list-participants",
            HubMethod::Join => "join",
            HubMethod::Leave => "leave",
            HubMethod::ListMessages => "list-messages",
            HubMethod::SendMessage => "send-message",
            HubMethod::RequestMessageSync => "request-message-sync",
        }
    }

    /// Number of positional arguments the method takes
    pub fn arity(&self) -> usize {
        match self {
            HubMethod::Join | HubMethod::Leave | HubMethod::SendMessage => 1,
            HubMethod::ListParticipants | HubMethod::ListMessages | HubMethod::RequestMessageSync => 0,
        }
    }
}

/// Client -> server remote invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationMessage {
    pub r#type: MessageType,
    /// Absent for fire-and-forget calls; no completion is sent back then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
    pub target: HubMethod,
    /// Positional arguments
    #[serde(default)]
    pub arguments: Vec<Value>,
}

impl InvocationMessage {
    pub fn new(invocation_id: Option<String>, target: HubMethod, arguments: Vec<Value>) -> Self {
        Self {
            r#type: MessageType::Invocation,
            invocation_id,
            target,
            arguments,
        }
    }
}

/// Server -> client reply to an invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub r#type: MessageType,
    pub invocation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompletionMessage {
    pub fn success(invocation_id: String, result: Value) -> Self {
        Self {
            r#type: MessageType::Completion,
            invocation_id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(invocation_id: String, error: String) -> Self {
        Self {
            r#type: MessageType::Completion,
            invocation_id,
            result: None,
            error: Some(error),
        }
    }
}

/// Chat message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub sender: String,
    pub content: String,
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender.into_string(),
            content: message.content.into_string(),
        }
    }
}

impl From<ChatMessageDto> for ChatMessage {
    fn from(dto: ChatMessageDto) -> Self {
        ChatMessage::new(
            ParticipantName::from(dto.sender),
            MessageContent::from(dto.content),
        )
    }
}

/// Participant joined notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantJoinedMessage {
    pub r#type: MessageType,
    pub name: String,
}

/// Participant left notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantLeftMessage {
    pub r#type: MessageType,
    pub name: String,
}

/// Message added notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageAddedMessage {
    pub r#type: MessageType,
    pub message: ChatMessageDto,
}

/// Full history, sent in reply to `request-message-sync`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListSyncedMessage {
    pub r#type: MessageType,
    pub messages: Vec<ChatMessageDto>,
}

/// Any frame the server pushes, as seen by a client.
///
/// The server serializes the concrete structs above; clients decode into
/// this enum and dispatch on the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    Completion {
        invocation_id: String,
        #[serde(default)]
        result: Option<Value>,
        #[serde(default)]
        error: Option<String>,
    },
    ParticipantJoined {
        name: String,
    },
    ParticipantLeft {
        name: String,
    },
    MessageAdded {
        message: ChatMessageDto,
    },
    MessageListSynced {
        messages: Vec<ChatMessageDto>,
    },
}

/// Serialize a hub event into its JSON frame
pub fn encode_event(event: HubEvent) -> Result<String, serde_json::Error> {
    match event {
        HubEvent::ParticipantJoined(name) => serde_json::to_string(&ParticipantJoinedMessage {
            r#type: MessageType::ParticipantJoined,
            name: name.into_string(),
        }),
        HubEvent::ParticipantLeft(name) => serde_json::to_string(&ParticipantLeftMessage {
            r#type: MessageType::ParticipantLeft,
            name: name.into_string(),
        }),
        HubEvent::MessageAdded(message) => serde_json::to_string(&MessageAddedMessage {
            r#type: MessageType::MessageAdded,
            message: message.into(),
        }),
        HubEvent::MessageListSynced(messages) => {
            serde_json::to_string(&MessageListSyncedMessage {
                r#type: MessageType::MessageListSynced,
                messages: messages.into_iter().map(ChatMessageDto::from).collect(),
            })
        }
    }
}
