//! Hearth chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server -- --port 8080
//! ```

use clap::Parser;
use hearth_server::{ServerArgs, ServerConfig, ServerError};
use hearth_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = start(&args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn start(args: &ServerArgs) -> Result<(), ServerError> {
    let config = ServerConfig::try_from(args)?;
    hearth_server::run(config).await
}
