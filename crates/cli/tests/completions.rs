// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for shell completions

#![allow(deprecated)]

mod common;

use common::HiveEnv;
use predicates::prelude::*;

#[test]
fn bash_completions_mention_subcommands() {
    HiveEnv::new()
        .hive()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hive"))
        .stdout(predicate::str::contains("pending"));
}
