// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration
//!
//! Settings live in `<state>/hive.toml`. Every section is optional; a missing
//! file yields defaults, an unreadable or invalid one is an error.

mod paths;
mod settings;

pub use paths::{state_dir, ConfigError, SETTINGS_FILE};
pub use settings::{
    AgentSettings, DaemonSettings, HookSettings, NotifySettings, QueueSettings, Settings,
};
