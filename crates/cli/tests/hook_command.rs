// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for the agent hook endpoint

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::HiveEnv;
use predicates::prelude::*;
use serde_json::{json, Value};

fn hook(env: &HiveEnv, payload: Value) -> Value {
    let output = env
        .hive()
        .arg("hook")
        .write_stdin(payload.to_string())
        .output()
        .unwrap();
    assert!(output.status.success(), "hook failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn read_only_tools_are_approved() {
    let env = HiveEnv::new();
    let out = hook(
        &env,
        json!({"hook_event_name": "PreToolUse", "tool_name": "Grep", "tool_input": {"pattern": "x"}}),
    );
    assert_eq!(out["hookSpecificOutput"]["hookEventName"], "PreToolUse");
    assert_eq!(out["hookSpecificOutput"]["permissionDecision"], "allow");
}

#[test]
fn dangerous_commands_are_denied() {
    let env = HiveEnv::new();
    let out = hook(
        &env,
        json!({"hook_event_name": "PreToolUse", "tool_name": "Bash", "tool_input": {"command": "rm -rf / --no-preserve-root"}}),
    );
    assert_eq!(out["hookSpecificOutput"]["permissionDecision"], "deny");
    assert!(out["hookSpecificOutput"]["permissionDecisionReason"]
        .as_str()
        .unwrap()
        .starts_with("Dangerous command blocked"));
}

#[test]
fn writes_to_configured_safe_dir_are_approved() {
    let env = HiveEnv::with_config("[hooks]\nsafe_write_dirs = [\"/srv/notes\"]\n");
    let out = hook(
        &env,
        json!({"hook_event_name": "PreToolUse", "tool_name": "Write", "tool_input": {"file_path": "/srv/notes/today.md"}}),
    );
    assert_eq!(out["hookSpecificOutput"]["permissionDecision"], "allow");

    let out = hook(
        &env,
        json!({"hook_event_name": "PreToolUse", "tool_name": "Write", "tool_input": {"file_path": "/etc/passwd"}}),
    );
    assert_eq!(out, json!({}));
}

#[test]
fn stop_reminds_of_pending_work() {
    let env = HiveEnv::new();
    env.add("Triage inbox", "high");

    let out = hook(&env, json!({"hook_event_name": "Stop", "stop_hook_active": false}));
    let message = out["systemMessage"].as_str().unwrap();
    assert!(message.starts_with("AUTONOMOUS MODE"));
    assert!(message.contains("1. Triage inbox"));

    let out = hook(&env, json!({"hook_event_name": "Stop", "stop_hook_active": true}));
    assert_eq!(out, json!({}));
}

#[test]
fn tool_use_and_stops_are_logged_to_hook_log() {
    let env = HiveEnv::new();
    hook(
        &env,
        json!({"hook_event_name": "PreToolUse", "tool_name": "Grep", "tool_input": {"pattern": "todo"}}),
    );
    hook(
        &env,
        json!({"hook_event_name": "PostToolUse", "tool_name": "Grep", "tool_input": {}, "tool_response": "3 matches"}),
    );
    hook(&env, json!({"hook_event_name": "Stop", "session_id": "s-1", "stop_hook_active": false}));

    let log = std::fs::read_to_string(env.path().join("logs/hooks.log")).unwrap();
    assert!(log.contains("tool start"), "log: {}", log);
    assert!(log.contains("tool=\"Grep\"") || log.contains("tool=Grep"), "log: {}", log);
    assert!(log.contains("tool end"), "log: {}", log);
    assert!(log.contains("agent stop"), "log: {}", log);
    assert!(log.contains("s-1"), "log: {}", log);
}

#[test]
fn unhandled_events_pass() {
    let env = HiveEnv::new();
    let out = hook(&env, json!({"hook_event_name": "Notification", "message": "hi"}));
    assert_eq!(out, json!({}));
}

#[test]
fn malformed_payload_fails() {
    HiveEnv::new()
        .hive()
        .arg("hook")
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("hook payload is not JSON"));
}
