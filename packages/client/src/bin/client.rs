//! Parlor chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-client -- alice localhost 5555
//! ```

use clap::Parser;
use parlor_client::ClientConfig;
use parlor_shared::{DEFAULT_HOST, DEFAULT_PORT, logger::setup_logger};

/// Line-based chat client; lines starting with '#' are commands
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct ClientArgs {
    /// Login id announced to the server
    login: String,

    /// Server host
    #[arg(default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = ClientArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ClientConfig {
        login: args.login,
        host: args.host,
        port: args.port,
    };

    // The console thread may still be blocked on input, so exit explicitly.
    match parlor_client::run_client(config).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
