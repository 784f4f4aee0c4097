// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use hive_core::{ConfigError, RoutineError};
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct HiveError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl HiveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Unknown routine name, listing what is configured
    pub fn unknown_routine(name: &str, available: &[String]) -> Self {
        let err = HiveError::new(format!("unknown routine '{}'", name));
        let err = if available.is_empty() {
            err.with_context("no routines are configured")
                .with_suggestion("Add a [[routines]] entry to hive.toml")
        } else {
            err.with_context(format!("available: {}", available.join(", ")))
        };
        err.with_suggestion("List routines: hive list --routines")
    }

    /// Settings file could not be read or parsed
    pub fn config(error: &ConfigError) -> Self {
        HiveError::new(error.to_string())
            .with_suggestion("Fix the settings file, or point at another with --config <path>")
    }

    pub fn routine_failed(name: &str, error: &str) -> Self {
        HiveError::new(format!("routine '{}' failed", name))
            .with_context(error.to_string())
            .with_suggestion("Check the [agent] command in hive.toml")
    }
}

impl From<RoutineError> for HiveError {
    fn from(error: RoutineError) -> Self {
        match error {
            RoutineError::NotFound { name, available } => {
                HiveError::unknown_routine(&name, &available)
            }
            other => HiveError::new(other.to_string()),
        }
    }
}

impl From<ConfigError> for HiveError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Routine(e) => e.into(),
            other => HiveError::config(&other),
        }
    }
}

impl fmt::Display for HiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HiveError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
