// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated state directory; every command runs with `HIVE_HOME`
/// pointing at it.
pub struct HiveEnv {
    dir: TempDir,
}

impl HiveEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Env with `hive.toml` already written
    pub fn with_config(config: &str) -> Self {
        let env = Self::new();
        env.write_config(config);
        env
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn queue_path(&self) -> PathBuf {
        self.path().join("work_queue.json")
    }

    pub fn write_config(&self, config: &str) {
        std::fs::write(self.path().join("hive.toml"), config).expect("Failed to write hive.toml");
    }

    pub fn hive(&self) -> Command {
        let mut cmd = Command::cargo_bin("hive").expect("hive binary");
        cmd.env("HIVE_HOME", self.path()).env_remove("RUST_LOG");
        cmd
    }

    /// Add a task and return its id
    pub fn add(&self, description: &str, priority: &str) -> String {
        let output = self
            .hive()
            .args(["add", description, "--priority", priority])
            .output()
            .expect("Failed to run hive add");
        assert!(output.status.success(), "hive add failed: {:?}", output);
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .find_map(|l| l.strip_prefix("Added task: "))
            .expect("task id in output")
            .to_string()
    }

    /// Tasks as stored, via `list --format json`
    pub fn tasks(&self) -> Vec<serde_json::Value> {
        let output = self
            .hive()
            .args(["list", "--format", "json"])
            .output()
            .expect("Failed to run hive list");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("JSON task list")
    }
}

/// Agent that answers with its prompt
pub const ECHO_AGENT: &str = "[agent]\ncommand = \"echo\"\nargs = []\n";
