//! Per-connection bookkeeping.

use crate::domain::{ParticipantName, SessionId};

/// State the server keeps for one WebSocket connection.
///
/// `joined` only matters when leave-on-disconnect is enabled: it lists the
/// names this session joined and has not left yet.
#[derive(Debug)]
pub struct SessionContext {
    id: SessionId,
    joined: Vec<ParticipantName>,
}

impl SessionContext {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            joined: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn record_join(&mut self, name: ParticipantName) {
        self.joined.push(name);
    }

    /// Forget one occurrence of `name`
    pub fn record_leave(&mut self, name: &ParticipantName) {
        if let Some(index) = self.joined.iter().position(|n| n == name) {
            self.joined.remove(index);
        }
    }

    pub fn take_joined(&mut self) -> Vec<ParticipantName> {
        std::mem::take(&mut self.joined)
    }
}
