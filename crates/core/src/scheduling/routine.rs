// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routines: named, cron-scheduled prompts
//!
//! Routines are configuration, not state. The registry is built once at
//! startup and never mutated; it preserves declaration order, which is the
//! order the scheduler evaluates routines within a tick.

use super::cron::{CronError, CronSchedule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from loading or looking up routines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutineError {
    #[error("unknown routine: {name} (available: {})", .available.join(", "))]
    NotFound { name: String, available: Vec<String> },
    #[error("duplicate routine name: {0}")]
    Duplicate(String),
    #[error("routine {name}: {source}")]
    Schedule {
        name: String,
        #[source]
        source: CronError,
    },
    #[error("routine {name}: invalid prompt template: {message}")]
    Template { name: String, message: String },
}

/// Routine as written in configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineConfig {
    pub name: String,
    /// Five-field cron expression
    pub schedule: String,
    /// Prompt template sent to the agent
    pub prompt: String,
    /// Channel to post the result to; None skips delivery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// A validated routine
#[derive(Clone, Debug, PartialEq)]
pub struct Routine {
    pub name: String,
    pub schedule: CronSchedule,
    pub prompt: String,
    pub channel: Option<String>,
    pub enabled: bool,
}

impl Routine {
    pub fn from_config(config: RoutineConfig) -> Result<Self, RoutineError> {
        let schedule =
            CronSchedule::parse(&config.schedule).map_err(|source| RoutineError::Schedule {
                name: config.name.clone(),
                source,
            })?;

        let env = minijinja::Environment::new();
        env.template_from_str(&config.prompt)
            .map_err(|e| RoutineError::Template {
                name: config.name.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            name: config.name,
            schedule,
            prompt: config.prompt,
            channel: config.channel,
            enabled: config.enabled,
        })
    }
}

/// Immutable, ordered catalog of routines
#[derive(Clone, Debug, Default)]
pub struct RoutineRegistry {
    routines: Vec<Routine>,
}

impl RoutineRegistry {
    pub fn new(routines: Vec<Routine>) -> Result<Self, RoutineError> {
        let mut seen = HashSet::new();
        for routine in &routines {
            if !seen.insert(routine.name.as_str()) {
                return Err(RoutineError::Duplicate(routine.name.clone()));
            }
        }
        Ok(Self { routines })
    }

    pub fn from_configs(configs: Vec<RoutineConfig>) -> Result<Self, RoutineError> {
        let routines = configs
            .into_iter()
            .map(Routine::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(routines)
    }

    /// Look up a routine by name
    pub fn get(&self, name: &str) -> Result<&Routine, RoutineError> {
        self.routines
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RoutineError::NotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// All routines in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Routine> {
        self.routines.iter()
    }

    /// Enabled routines in declaration order
    pub fn enabled(&self) -> impl Iterator<Item = &Routine> {
        self.routines.iter().filter(|r| r.enabled)
    }

    pub fn names(&self) -> Vec<String> {
        self.routines.iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }
}
