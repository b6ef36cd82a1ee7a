//! InMemory PresenceRegistry 実装
//!
//! Roster ドメインモデルを tokio の Mutex で保護して保持します。
//! 全ての変更はこの Mutex を通るため、同時に Join されても更新は失われません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ParticipantName, PresenceRegistry, Roster};

/// インメモリ PresenceRegistry 実装
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    roster: Mutex<Roster>,
}

impl InMemoryPresenceRegistry {
    /// 空の PresenceRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn list_participants(&self) -> Vec<ParticipantName> {
        let roster = self.roster.lock().await;
        roster.list().to_vec()
    }

    async fn add_participant(&self, name: ParticipantName) {
        let mut roster = self.roster.lock().await;
        roster.add(name);
    }

    async fn remove_participant(&self, name: &ParticipantName) -> bool {
        let mut roster = self.roster.lock().await;
        roster.remove_first(name)
    }
}
