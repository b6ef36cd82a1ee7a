//! Seams between the hub and its state.
//!
//! Use cases depend on these traits only. The in-memory implementations live
//! in `infrastructure`.

use async_trait::async_trait;

use super::{ChatMessage, EventSink, HubEvent, ParticipantName, SessionId};

/// Process-wide set of online participant names.
///
/// None of these operations fail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Current names in insertion order
    async fn list_participants(&self) -> Vec<ParticipantName>;

    /// Append `name` unconditionally
    async fn add_participant(&self, name: ParticipantName);

    /// Remove the first occurrence of `name`; returns whether one was removed
    async fn remove_participant(&self, name: &ParticipantName) -> bool;
}

/// Process-wide append-only message log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Append to the tail
    async fn append_message(&self, message: ChatMessage);

    /// Full history in insertion order
    async fn snapshot(&self) -> Vec<ChatMessage>;

    /// Number of stored messages
    async fn count(&self) -> usize;
}

/// Subscriber registry: session handle -> outbound event sink.
///
/// Delivery is fire-and-forget. Implementations must never block on a slow
/// session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionNotifier: Send + Sync {
    /// Register a session's outbound sink
    async fn subscribe(&self, session_id: SessionId, sink: EventSink);

    /// Release a session's sink; returns whether it was registered
    async fn unsubscribe(&self, session_id: &SessionId) -> bool;

    /// Queue `event` for every registered session; returns how many accepted it
    async fn broadcast(&self, event: HubEvent) -> usize;

    /// Queue `event` for one session; returns whether it was accepted
    async fn send_to(&self, session_id: &SessionId, event: HubEvent) -> bool;

    /// Number of registered sessions
    async fn session_count(&self) -> usize;
}
