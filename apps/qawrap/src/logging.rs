//! Diagnostic logging setup.
//!
//! Logs go to stderr and are off unless `QAWRAP_LOG` sets a filter
//! (e.g. `QAWRAP_LOG=qawrap=debug`), so wrapper output stays terse.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "QAWRAP_LOG";

/// Build the filter from `QAWRAP_LOG`, falling back to `off`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
