//! Hearth chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-client -- --name Ayşe
//! ```

use clap::Parser;
use hearth_client::{ClientArgs, run_client};
use hearth_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run_client(args).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
