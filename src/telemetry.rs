//! Tracing bootstrap for the CLI.
//!
//! The interactive session owns the terminal, so it only ever logs to a file.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Headless commands: stderr, or the configured file when one is set
    Stderr,
    /// Interactive mode: the configured file, or nowhere
    FileOnly,
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// Returns whether a subscriber was installed: `false` when the sink has
/// nowhere to write or another global subscriber is already in place.
pub fn init_telemetry(cfg: &LoggingConfig, sink: LogSink) -> Result<bool> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match (&cfg.file, sink) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            fmt::layer().with_ansi(false).with_writer(Mutex::new(file)).boxed()
        }
        (None, LogSink::Stderr) => fmt::layer().with_writer(std::io::stderr).boxed(),
        (None, LogSink::FileOnly) => return Ok(false),
    };

    // a subscriber may already be installed (tests, embedding); keep it
    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
    {
        tracing::debug!(target: "telemetry", %err, "global subscriber already set, keeping it");
        return Ok(false);
    }

    tracing::debug!(
        target: "telemetry",
        level = %cfg.level,
        file = ?cfg.file,
        "telemetry initialized"
    );
    Ok(true)
}
