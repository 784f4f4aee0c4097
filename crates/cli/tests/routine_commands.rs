// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for routine listing and manual runs

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{HiveEnv, ECHO_AGENT};
use predicates::prelude::*;

const ROUTINES: &str = r#"
[[routines]]
name = "morning-brief"
schedule = "0 8 * * 1-5"
prompt = "Brief for {{ weekday }} in #{{ channel }}."
channel = "general"

[[routines]]
name = "weekly-review"
schedule = "0 17 * * 5"
prompt = "Review the week."
enabled = false
"#;

fn env() -> HiveEnv {
    HiveEnv::with_config(&format!("{}{}", ECHO_AGENT, ROUTINES))
}

#[test]
fn list_routines_text() {
    env()
        .hive()
        .args(["list", "--routines"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Available routines:\n"))
        .stdout(predicate::str::contains(
            "  morning-brief: 0 8 * * 1-5 (enabled) -> #general, next ",
        ))
        .stdout(predicate::str::contains("  weekly-review: 0 17 * * 5 (disabled)\n"));
}

#[test]
fn list_routines_json() {
    let output = env()
        .hive()
        .args(["list", "--routines", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "morning-brief");
    assert_eq!(rows[0]["channel"], "general");
    assert!(rows[0]["next_run"].is_string());
    assert_eq!(rows[1]["enabled"], false);
    assert!(rows[1]["next_run"].is_null());
}

#[test]
fn dry_run_prints_frame() {
    env()
        .hive()
        .args(["run", "morning-brief", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROUTINE: morning-brief\nCHANNEL: general\n"))
        .stdout(predicate::str::contains("Current time: "))
        .stdout(predicate::str::contains(" in #general."))
        .stdout(predicate::str::contains("=".repeat(60)));
}

#[test]
fn disabled_routine_runs_manually() {
    env()
        .hive()
        .args(["run", "weekly-review", "-n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review the week."));
}

#[test]
fn undeliverable_result_is_still_printed() {
    env()
        .hive()
        .args(["run", "morning-brief"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" in #general."))
        .stderr(predicate::str::contains("delivery to #general failed"));
}

#[test]
fn unknown_routine_lists_available() {
    env()
        .hive()
        .args(["run", "nightly"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown routine 'nightly'"))
        .stderr(predicate::str::contains("available: morning-brief, weekly-review"));
}

#[test]
fn agent_failure_exits_non_zero() {
    let env = HiveEnv::with_config(&format!("[agent]\ncommand = \"false\"\nargs = []\n{}", ROUTINES));
    env.hive()
        .args(["run", "morning-brief", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("routine 'morning-brief' failed"));
}

#[test]
fn invalid_schedule_is_reported() {
    let env = HiveEnv::with_config(
        "[[routines]]\nname = \"broken\"\nschedule = \"every morning\"\nprompt = \"hi\"\n",
    );
    env.hive()
        .args(["list", "--routines"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("routine broken"));
}
