//! InMemory 実装

pub mod message;
pub mod presence;

pub use message::InMemoryMessageLog;
pub use presence::InMemoryPresenceRegistry;
