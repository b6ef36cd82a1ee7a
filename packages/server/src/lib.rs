//! Hearth chat server library.
//!
//! A single shared room: a presence registry of participant names, an
//! append-only message log, and a hub that broadcasts every change to all
//! connected WebSocket sessions.

pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use error::ServerError;
pub use ui::{ServerArgs, ServerConfig, run};
