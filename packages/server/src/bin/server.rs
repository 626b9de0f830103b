//! Group-chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hearth-server
//! ```

use std::net::IpAddr;

use clap::Parser;
use hearth_server::{
    RelayConfig,
    config::{DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_PORT},
};
use hearth_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(version, about = "Group-chat relay: every message is broadcast to every client")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to bind
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Maximum media payload per envelope in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_MESSAGE_SIZE)]
    max_message_size: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = RelayConfig {
        host: args.host,
        port: args.port,
        max_message_size: args.max_message_size,
    };

    // Run the server
    if let Err(e) = hearth_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
