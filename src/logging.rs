//! Log sink configuration
//!
//! Diagnostic events go to two places: a human-facing stderr layer and a
//! persistent plain-text log file next to the working directory. The core
//! only ever emits through `tracing`; nothing below `main` knows either
//! sink exists.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Session log file, appended across runs unless `--clean` is passed
pub const LOG_FILE: &str = "serp_harvest.log";

/// Truncate the log file without deleting it
pub fn clear_log_file() -> std::io::Result<()> {
    if std::path::Path::new(LOG_FILE).exists() {
        OpenOptions::new().write(true).truncate(true).open(LOG_FILE)?;
    }
    Ok(())
}

/// Install the global subscriber: env-filtered stderr plus the log file
///
/// The chromiumoxide handler/conn targets are silenced; they flood every
/// level below warn with CDP frame traffic.
pub fn init(fresh_log: bool) -> Result<()> {
    if fresh_log {
        clear_log_file().context("Failed to clear log file")?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("Failed to open {LOG_FILE}"))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        .add_directive("chromiumoxide::handler=off".parse()?)
        .add_directive("chromiumoxide::conn=off".parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(())
}
