// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Settings file name inside the state directory
pub const SETTINGS_FILE: &str = "hive.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory (set HIVE_HOME)")]
    NoStateDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
    #[error(transparent)]
    Routine(#[from] crate::scheduling::RoutineError),
}

/// State directory: `$HIVE_HOME`, then `$XDG_STATE_HOME/hive`, then
/// `~/.local/state/hive`
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Some(home) = non_empty_var("HIVE_HOME") {
        return Ok(PathBuf::from(home));
    }
    if let Some(xdg) = non_empty_var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("hive"));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/hive"))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
