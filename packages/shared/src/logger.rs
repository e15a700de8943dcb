//! Logger setup shared by the server and client binaries.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Logs go to stderr so they never interleave with chat lines on stdout.
/// `RUST_LOG` wins when set; otherwise the binary's own crate logs at
/// `default_level` and everything else at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_target = bin_name.replace('-', "_");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{crate_target}={default_level},parlor_shared={default_level}"
        ))
    });

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
