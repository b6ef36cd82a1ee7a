//! BroadcastHub: the coordinator every connected session invokes.
//!
//! Each mutating operation updates one registry and then queues the matching
//! event for every subscribed session. The two steps run under a per-registry
//! ordering gate, so all subscribers see the events of one registry in the
//! order the registry applied them. Presence and message events are not
//! ordered relative to each other.
//!
//! Snapshot reads take the same gate. `with_participants`/`with_messages`
//! hand the snapshot to a closure while the gate is still held, so a reply
//! queued from inside it lands after every event the snapshot reflects and
//! before every event it does not.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, EventSink, MessageLog, ParticipantName, PresenceRegistry, SessionId,
    SessionNotifier,
};

use super::{
    JoinRoomUseCase, LeaveRoomUseCase, ListMessagesUseCase, ListParticipantsUseCase,
    SendMessageUseCase, SyncMessagesUseCase,
};

/// Coordinator between the registries and the connected sessions
pub struct BroadcastHub {
    presence: Arc<dyn PresenceRegistry>,
    messages: Arc<dyn MessageLog>,
    notifier: Arc<dyn SessionNotifier>,
    /// Held across "mutate roster + enqueue broadcast"
    presence_order: Mutex<()>,
    /// Held across "append message + enqueue broadcast" and sync snapshots
    message_order: Mutex<()>,
}

impl BroadcastHub {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        messages: Arc<dyn MessageLog>,
        notifier: Arc<dyn SessionNotifier>,
    ) -> Self {
        Self {
            presence,
            messages,
            notifier,
            presence_order: Mutex::new(()),
            message_order: Mutex::new(()),
        }
    }

    /// Register a newly connected session so it receives broadcasts
    pub async fn connect(&self, session_id: SessionId, sink: EventSink) {
        self.notifier.subscribe(session_id, sink).await;
        tracing::info!("Session '{}' connected", session_id);
    }

    /// Release a session's subscriber handle.
    ///
    /// Does not touch the roster: names joined by this session stay until
    /// someone issues `leave` for them.
    pub async fn disconnect(&self, session_id: &SessionId) -> bool {
        let removed = self.notifier.unsubscribe(session_id).await;
        if removed {
            tracing::info!("Session '{}' disconnected", session_id);
        }
        removed
    }

    pub async fn list_participants(&self) -> Vec<ParticipantName> {
        self.with_participants(|names| names).await
    }

    /// Run `f` on a roster snapshot with no join/leave in between
    pub async fn with_participants<T>(&self, f: impl FnOnce(Vec<ParticipantName>) -> T) -> T {
        let _order = self.presence_order.lock().await;
        let names = ListParticipantsUseCase::new(self.presence.clone())
            .execute()
            .await;
        f(names)
    }

    /// Add `name` to the roster and broadcast `ParticipantJoined`
    pub async fn join(&self, name: ParticipantName) -> usize {
        let _order = self.presence_order.lock().await;
        tracing::info!("Participant '{}' joined", name);
        JoinRoomUseCase::new(self.presence.clone(), self.notifier.clone())
            .execute(name)
            .await
    }

    /// Remove one occurrence of `name` and broadcast `ParticipantLeft`
    pub async fn leave(&self, name: ParticipantName) -> usize {
        let _order = self.presence_order.lock().await;
        tracing::info!("Participant '{}' left", name);
        LeaveRoomUseCase::new(self.presence.clone(), self.notifier.clone())
            .execute(name)
            .await
    }

    pub async fn list_messages(&self) -> Vec<ChatMessage> {
        self.with_messages(|messages| messages).await
    }

    /// Run `f` on a history snapshot with no append in between
    pub async fn with_messages<T>(&self, f: impl FnOnce(Vec<ChatMessage>) -> T) -> T {
        let _order = self.message_order.lock().await;
        let messages = ListMessagesUseCase::new(self.messages.clone())
            .execute()
            .await;
        f(messages)
    }

    /// Append `message` and broadcast `MessageAdded`
    pub async fn send_message(&self, message: ChatMessage) -> usize {
        let _order = self.message_order.lock().await;
        tracing::debug!(
            "Message from '{}' ({} bytes)",
            message.sender,
            message.content.as_str().len()
        );
        SendMessageUseCase::new(self.messages.clone(), self.notifier.clone())
            .execute(message)
            .await
    }

    /// Push the full history to `session_id` only
    pub async fn request_message_sync(&self, session_id: &SessionId) -> bool {
        let _order = self.message_order.lock().await;
        SyncMessagesUseCase::new(self.messages.clone(), self.notifier.clone())
            .execute(session_id)
            .await
    }

    pub async fn message_count(&self) -> usize {
        self.messages.count().await
    }

    pub async fn session_count(&self) -> usize {
        self.notifier.session_count().await
    }
}
