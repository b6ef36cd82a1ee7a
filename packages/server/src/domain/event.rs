//! Events pushed from the hub to connected sessions.

use tokio::sync::mpsc;

use super::{ChatMessage, ParticipantName};

/// A state change (or sync reply) delivered to a session's outbound queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubEvent {
    /// A name was added to the roster
    ParticipantJoined(ParticipantName),
    /// A leave was applied for this name (whether or not it was present)
    ParticipantLeft(ParticipantName),
    /// A message was appended to the log
    MessageAdded(ChatMessage),
    /// Full message history, sent to the requesting session only
    MessageListSynced(Vec<ChatMessage>),
}

impl HubEvent {
    /// Event name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            HubEvent::ParticipantJoined(_) => "participant-joined",
            HubEvent::ParticipantLeft(_) => "participant-left",
            HubEvent::MessageAdded(_) => "message-added",
            HubEvent::MessageListSynced(_) => "message-list-synced",
        }
    }
}

/// One entry of a session's outbound queue.
///
/// Hub events and replies to the session's own invocations share a single
/// FIFO, so the client sees them in the order the server produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Event(HubEvent),
    /// Encoded completion frame
    Completion(String),
}

impl Outbound {
    /// Frame name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Outbound::Event(event) => event.name(),
            Outbound::Completion(_) => "completion",
        }
    }
}

/// Outbound queue of one session.
pub type EventSink = mpsc::Sender<Outbound>;

/// Receiving half of [`EventSink`], drained by the session's writer task.
pub type EventStream = mpsc::Receiver<Outbound>;
