//! Parlor chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server -- 5555
//! ```

use clap::Parser;
use parlor_server::ServerConfig;
use parlor_shared::{DEFAULT_PORT, logger::setup_logger};

/// Multi-client chat server with an operator console on stdin
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct ServerArgs {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // A pending stdin read would block runtime shutdown, so exit explicitly.
    match parlor_server::run_server(ServerConfig { port: args.port }).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    }
}
