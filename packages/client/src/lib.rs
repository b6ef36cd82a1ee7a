//! Hearth CLI chat client.
//!
//! Connects to the server's `/ws` endpoint, seeds the local roster and
//! history, joins under the given name, and then relays typed lines as chat
//! messages while printing pushed events.

pub mod args;
pub mod chat;
pub mod command;
pub mod error;
pub mod room;
pub mod runner;

pub use args::ClientArgs;
pub use error::ClientError;
pub use runner::run_client;
