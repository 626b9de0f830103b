//! Terminal chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-client -- --username alice
//! ```

use clap::Parser;
use hearth_client::{ClientArgs, run_client};
use hearth_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Keep the terminal quiet: warnings only unless RUST_LOG says otherwise
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    if let Err(e) = run_client(args).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}
