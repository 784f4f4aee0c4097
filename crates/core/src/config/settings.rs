// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::paths::ConfigError;
use crate::hooks::DEFAULT_BLOCKED_PATTERNS;
use crate::scheduling::{RoutineConfig, RoutineRegistry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_QUEUE_FILE: &str = "work_queue.json";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub queue: QueueSettings,
    pub daemon: DaemonSettings,
    pub agent: AgentSettings,
    pub notify: NotifySettings,
    pub hooks: HookSettings,
    pub routines: Vec<RoutineConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueSettings {
    /// Record store path; relative paths resolve against the state directory
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonSettings {
    /// Sleep when the queue has nothing pending
    #[serde(with = "humantime_serde")]
    pub idle_interval: Duration,
    /// Pause between consecutive tasks
    #[serde(with = "humantime_serde")]
    pub task_interval: Duration,
    pub max_consecutive_failures: u32,
}

impl Default for DaemonSettings {
    fn default() -> Self {
        Self {
            idle_interval: Duration::from_secs(60),
            task_interval: Duration::from_secs(10),
            max_consecutive_failures: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentSettings {
    pub command: String,
    /// Arguments placed before the prompt
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            command: "claude".to_string(),
            args: vec!["--print".to_string()],
            working_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifySettings {
    /// Channel name to webhook URL
    pub webhooks: BTreeMap<String, String>,
    /// Legacy channel name to delivery channel
    pub aliases: BTreeMap<String, String>,
}

impl NotifySettings {
    /// Follow one alias hop; unaliased names map to themselves
    pub fn resolve_channel<'a>(&'a self, channel: &'a str) -> &'a str {
        self.aliases.get(channel).map(String::as_str).unwrap_or(channel)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookSettings {
    pub safe_write_dirs: Vec<PathBuf>,
    pub blocked_patterns: Vec<String>,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self {
            safe_write_dirs: Vec::new(),
            blocked_patterns: DEFAULT_BLOCKED_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

impl Settings {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if settings.daemon.max_consecutive_failures == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "daemon.max_consecutive_failures must be at least 1".to_string(),
            });
        }
        Ok(settings)
    }

    /// Load from a file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn queue_path(&self, state_dir: &Path) -> PathBuf {
        match &self.queue.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => state_dir.join(path),
            None => state_dir.join(DEFAULT_QUEUE_FILE),
        }
    }

    /// Validate every configured routine into a registry
    pub fn routine_registry(&self) -> Result<RoutineRegistry, ConfigError> {
        Ok(RoutineRegistry::from_configs(self.routines.clone())?)
    }
}
