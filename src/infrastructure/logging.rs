//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `directive`.
///
/// Falls back to "warn" when the directive does not parse. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
