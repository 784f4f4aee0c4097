// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn display_numbers_suggestions() {
    let err = HiveError::new("Something went wrong")
        .with_context("First context")
        .with_suggestion("Try this")
        .with_suggestion("Or this");

    let output = err.to_string();
    assert!(output.starts_with("error: Something went wrong\n"));
    assert!(output.contains("  -> First context"));
    assert!(output.contains("  1. Try this"));
    assert!(output.contains("  2. Or this"));
}

#[test]
fn unknown_routine_lists_available() {
    let err: HiveError = RoutineError::NotFound {
        name: "nightly".to_string(),
        available: vec!["morning-brief".to_string(), "weekly-review".to_string()],
    }
    .into();

    let output = err.to_string();
    assert!(output.contains("unknown routine 'nightly'"));
    assert!(output.contains("available: morning-brief, weekly-review"));
    assert!(output.contains("hive list --routines"));
}

#[test]
fn unknown_routine_without_any_configured() {
    let output = HiveError::unknown_routine("nightly", &[]).to_string();
    assert!(output.contains("no routines are configured"));
}

#[test]
fn routine_config_errors_unwrap() {
    let err: HiveError = ConfigError::Routine(RoutineError::Duplicate("brief".to_string())).into();
    assert_eq!(err.message, "duplicate routine name: brief");
}
