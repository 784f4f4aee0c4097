// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon log file setup

use crate::lifecycle::LifecycleError;
use std::io::Write;
use std::path::Path;

/// Startup marker prefix written to the log before anything else.
/// Full format: "--- hived: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- hived: starting (pid: ";

fn append(log_path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
}

/// Append the startup marker synchronously, before tracing is installed
pub fn write_startup_marker(log_path: &Path) -> Result<(), LifecycleError> {
    let mut file = append(log_path)?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

/// Write a startup error synchronously; the non-blocking writer may not
/// flush before the process exits.
pub fn write_startup_error(log_path: &Path, error: &LifecycleError) {
    let Ok(mut file) = append(log_path) else {
        return;
    };
    let _ = writeln!(file, "ERROR failed to start daemon: {}", error);
}

/// Install the global subscriber: non-blocking file writer plus stderr.
/// Keep the returned guard alive for the life of the process.
pub fn setup_logging(
    log_path: &Path,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let dir = log_path.parent().ok_or(LifecycleError::NoStateDir)?;
    std::fs::create_dir_all(dir)?;
    let file_name = log_path.file_name().ok_or(LifecycleError::NoStateDir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| LifecycleError::Logging(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
