// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State directory, settings, and queue resolution shared by commands

use crate::error::HiveError;
use hive_core::config::{self, SETTINGS_FILE};
use hive_core::Settings;
use hive_storage::{JsonFileStore, WorkQueue};
use std::path::{Path, PathBuf};

pub struct Context {
    pub state_dir: PathBuf,
    pub settings_path: PathBuf,
    pub settings: Settings,
}

impl Context {
    /// Resolve the state directory and load settings from `config_path`,
    /// or `<state_dir>/hive.toml` when none is given
    pub fn load(config_path: Option<&Path>) -> Result<Self, HiveError> {
        let state_dir = config::state_dir()?;
        let settings_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| state_dir.join(SETTINGS_FILE));
        let settings = Settings::load(&settings_path)?;
        Ok(Self {
            state_dir,
            settings_path,
            settings,
        })
    }

    pub fn queue(&self) -> WorkQueue<JsonFileStore> {
        WorkQueue::open(self.settings.queue_path(&self.state_dir))
    }
}
