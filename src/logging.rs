//! Logging setup for the planner binary using `tracing` and `tracing-subscriber`.
//!
//! Log lines go to stderr so they never mix with the menu on stdout.
//!
//! # Log Levels
//!
//! - `warn`: rejected catalog lines, unreadable files, failed actions
//! - `info`: load summaries
//! - `debug`: individual courses and menu dispatch

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter: `RUST_LOG` wins over the command-line directive.
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid log filter {:?}: {}", directive, e)),
    }
}

/// Install the global subscriber.
pub fn init_logging(directive: &str) -> Result<()> {
    let filter = build_filter(directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
