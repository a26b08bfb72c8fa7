//! Logging setup.
//!
//! Warnings and diagnostics go through `tracing` to stderr so that stdout
//! carries only the export progress and summary. Verbosity follows
//! `RUST_LOG` and defaults to `info`.

use crate::{error::ExportError, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// Fails if a subscriber has already been installed.
pub fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ExportError::Logging {
            message: e.to_string(),
        })
}
