//! Tracing setup for binaries and tests.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber formatting to stderr.
///
/// The filter is read from `RUST_LOG`, falling back to `info`. Safe to call
/// more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
