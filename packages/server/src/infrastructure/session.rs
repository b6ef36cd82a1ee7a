//! Session subscriber registry.
//!
//! Maps each live session to its bounded outbound queue. Events are queued
//! with `try_send`, so a session whose queue is full loses that event instead
//! of stalling delivery to everyone else.

use std::collections::HashMap;

use async_trait::async_trait;
use hearth_shared::time::get_jst_timestamp;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{EventSink, HubEvent, Outbound, SessionId, SessionNotifier};

/// Connection information of one subscribed session
pub struct SessionInfo {
    /// Outbound event queue
    pub sink: EventSink,
    /// Unix timestamp when subscribed (in JST, milliseconds)
    pub connected_at: i64,
}

/// In-memory subscriber registry
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, SessionInfo>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Queue one event, logging why it was dropped if the queue refused it.
fn deliver(session_id: &SessionId, info: &SessionInfo, event: HubEvent) -> bool {
    let outbound = Outbound::Event(event);
    let name = outbound.name();
    match info.sink.try_send(outbound) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(
                "Outbound queue of session '{}' is full, dropping {}",
                session_id,
                name
            );
            false
        }
        Err(TrySendError::Closed(_)) => {
            tracing::debug!(
                "Session '{}' is closing, dropping {}",
                session_id,
                name
            );
            false
        }
    }
}

#[async_trait]
impl SessionNotifier for SessionRegistry {
    async fn subscribe(&self, session_id: SessionId, sink: EventSink) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(
            session_id,
            SessionInfo {
                sink,
                connected_at: get_jst_timestamp(),
            },
        );
        tracing::debug!(
            "Session '{}' subscribed ({} live)",
            session_id,
            sessions.len()
        );
    }

    async fn unsubscribe(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.remove(session_id) {
            Some(info) => {
                tracing::debug!(
                    "Session '{}' unsubscribed after {} ms ({} live)",
                    session_id,
                    get_jst_timestamp() - info.connected_at,
                    sessions.len()
                );
                true
            }
            None => false,
        }
    }

    async fn broadcast(&self, event: HubEvent) -> usize {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|(session_id, info)| deliver(session_id, info, event.clone()))
            .count()
    }

    async fn send_to(&self, session_id: &SessionId, event: HubEvent) -> bool {
        let sessions = self.sessions.lock().await;
        match sessions.get(session_id) {
            Some(info) => deliver(session_id, info, event),
            None => {
                tracing::debug!(
                    "Session '{}' is not subscribed, dropping {}",
                    session_id,
                    event.name()
                );
                false
            }
        }
    }

    async fn session_count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}
