//! WebSocket chat server implementation.

pub mod config;
mod handler;
pub mod runner;
pub mod session;
mod signal;
pub mod state;

pub use config::{ConfigError, ServerArgs, ServerConfig};
pub use runner::{build_router, run, serve};
