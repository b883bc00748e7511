//! Logging configuration for the window lab.
//!
//! Logs go to stderr so stdout carries only rendered results.

use tracing_subscriber::EnvFilter;

/// Initializes logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (from the config
/// file) is used, falling back to "info" if it does not parse.
pub fn init_stderr_logging(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .init();
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
