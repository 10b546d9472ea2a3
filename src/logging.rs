// Tracing setup.
// Events go to a log file in the cache directory; the terminal belongs to the TUI.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::cache::log_path;
use crate::error::Result;

/// Env var holding a tracing filter directive, e.g. `pagestat=debug`.
pub const LOG_ENV: &str = "PAGESTAT_LOG";

/// Install the global subscriber, appending to `<dir>/pagestat.log`.
pub fn init(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(dir))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
