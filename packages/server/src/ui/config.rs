//! Server configuration.
//!
//! Flags are parsed with clap and can also come from `HEARTH_*` environment
//! variables. `ServerConfig` is the validated form the runner consumes.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use thiserror::Error;

/// Default bound of each session's outbound event queue
pub const DEFAULT_SESSION_QUEUE_CAPACITY: usize = 256;

/// Command line options of `hearth-server`
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Single-room presence and broadcast chat server")]
pub struct ServerArgs {
    /// IP address to bind to
    #[arg(long, env = "HEARTH_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "HEARTH_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Events buffered per session before further events to it are dropped
    #[arg(long, env = "HEARTH_SESSION_QUEUE_CAPACITY", default_value_t = DEFAULT_SESSION_QUEUE_CAPACITY)]
    pub session_queue_capacity: usize,

    /// Issue `leave` for a session's joined names when it disconnects
    #[arg(long, env = "HEARTH_LEAVE_ON_DISCONNECT")]
    pub leave_on_disconnect: bool,

    /// Log level for Hearth crates when RUST_LOG is not set
    #[arg(long, env = "HEARTH_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("session queue capacity must be at least 1")]
    ZeroQueueCapacity,
}

/// Validated server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to bind
    pub addr: SocketAddr,
    /// Bound of each session's outbound event queue
    pub session_queue_capacity: usize,
    /// Whether a disconnect leaves the names the session joined
    pub leave_on_disconnect: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            session_queue_capacity: DEFAULT_SESSION_QUEUE_CAPACITY,
            leave_on_disconnect: false,
        }
    }
}

impl TryFrom<&ServerArgs> for ServerConfig {
    type Error = ConfigError;

    fn try_from(args: &ServerArgs) -> Result<Self, Self::Error> {
        let ip: IpAddr = args
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost {
                host: args.host.clone(),
                source,
            })?;
        if args.session_queue_capacity == 0 {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        Ok(Self {
            addr: SocketAddr::new(ip, args.port),
            session_queue_capacity: args.session_queue_capacity,
            leave_on_disconnect: args.leave_on_disconnect,
        })
    }
}
