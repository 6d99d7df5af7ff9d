//! Diagnostic logging setup.
//!
//! Diagnostics go through `tracing` to stderr so that command output on
//! stdout stays machine-readable (`--json`).

use anyhow::{anyhow, Result};
use tracing::Level;

/// Install the global fmt subscriber.
///
/// `verbose` forces `debug` regardless of the configured level. Calling this
/// twice is an error from the subscriber registry and is reported as such.
pub fn init(level: &str, verbose: bool) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        level
            .parse::<Level>()
            .map_err(|_| anyhow!("invalid log level: {}", level))?
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}
