//! Log setup.
//!
//! The TUI owns the terminal, so events go to `pomo.log` in the data
//! directory. `POMO_LOG` takes an `EnvFilter` directive; the default is
//! `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::PomoError;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "POMO_LOG";

/// Filter from `POMO_LOG`, falling back to `info`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to `log_file`.
///
/// # Errors
///
/// Returns an error if the log file can't be opened or a subscriber is
/// already installed.
pub fn init_tracing(log_file: &Path) -> Result<(), PomoError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            PomoError::Config(format!("Failed to open log file {}: {e}", log_file.display()))
        })?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(env_filter())
        .try_init()
        .map_err(|e| PomoError::Config(format!("Failed to set up logging: {e}")))
}
