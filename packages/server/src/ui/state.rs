//! Server state shared by all handlers.

use std::sync::Arc;

use hearth_shared::time::get_jst_timestamp;

use crate::{
    infrastructure::{
        repository::{InMemoryMessageLog, InMemoryPresenceRegistry},
        session::SessionRegistry,
    },
    ui::config::ServerConfig,
    usecase::BroadcastHub,
};

/// Shared application state
pub struct AppState {
    /// The hub every session invokes
    pub hub: Arc<BroadcastHub>,
    /// Validated server configuration
    pub config: ServerConfig,
    /// Unix timestamp when the registries were created (in JST, milliseconds)
    pub started_at: i64,
}

impl AppState {
    /// Wire the in-memory registries into a fresh hub
    pub fn new(config: ServerConfig) -> Self {
        let hub = BroadcastHub::new(
            Arc::new(InMemoryPresenceRegistry::new()),
            Arc::new(InMemoryMessageLog::new()),
            Arc::new(SessionRegistry::new()),
        );
        Self {
            hub: Arc::new(hub),
            config,
            started_at: get_jst_timestamp(),
        }
    }
}
