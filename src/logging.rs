//! Logging initialization for the binary.
//!
//! The filter comes from `GLYPHPLAY_LOG`, then `RUST_LOG`, then the
//! configured level. Logs go to a file when one is configured, otherwise to
//! stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GLYPHPLAY_LOG";

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Filter directive used when no environment filter is set.
    pub level: String,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{}'", level))
}

/// Install the global subscriber.
#[cfg(not(tarpaulin_include))]
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let filter = build_filter(&settings.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match &settings.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_target(true)
                .with_ansi(false);
            registry.with(layer).try_init()?;
        }
        None => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact();
            registry.with(layer).try_init()?;
        }
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}
