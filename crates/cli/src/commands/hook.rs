// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent hook endpoint: one event in on stdin, one decision out on stdout

use crate::context::Context;
use anyhow::{Context as _, Result};
use hive_core::config::HookSettings;
use hive_core::hooks::{
    DangerousCommandGuard, PendingWorkReminder, ProgressTracker, ReadOnlyApproval,
    SafeWriteApproval, ToolAuditLog,
};
use hive_core::{HookChain, ToolEvent};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Read;
use std::path::Path;

const HOOK_LOG: &str = "hooks.log";

pub fn handle(ctx: &Context) -> Result<()> {
    // stdout carries the decision; the audit trail goes to a file
    if let Err(e) = setup_logging(&ctx.state_dir) {
        crate::setup_logging();
        tracing::warn!(error = %e, "hook log unavailable, logging to stderr");
    }

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read hook payload from stdin")?;
    let output = respond(ctx, &input)?;
    println!("{}", output);
    Ok(())
}

fn respond(ctx: &Context, input: &str) -> Result<Value> {
    let payload: Value = serde_json::from_str(input).context("hook payload is not JSON")?;
    let event = match ToolEvent::deserialize(&payload) {
        Ok(event) => event,
        Err(e) => {
            let kind = payload.get("hook_event_name").and_then(Value::as_str);
            tracing::debug!(?kind, error = %e, "ignoring unhandled hook event");
            return Ok(json!({}));
        }
    };

    // Only a stop needs the queue
    let pending = match event {
        ToolEvent::Stop(_) => ctx
            .queue()
            .list_pending()
            .into_iter()
            .map(|t| t.description)
            .collect(),
        _ => Vec::new(),
    };

    let decision = build_chain(&ctx.settings.hooks, pending).dispatch(&event);
    Ok(decision.to_output(&event))
}

fn build_chain(settings: &HookSettings, pending: Vec<String>) -> HookChain {
    HookChain::new()
        .with(ReadOnlyApproval)
        .with(SafeWriteApproval::new(settings.safe_write_dirs.clone()))
        .with(DangerousCommandGuard::new(settings.blocked_patterns.clone()))
        .with(ToolAuditLog)
        .with(ProgressTracker)
        .with(PendingWorkReminder::new(pending))
}

/// Append hook events to `<state_dir>/logs/hooks.log`
fn setup_logging(state_dir: &Path) -> std::io::Result<()> {
    use tracing_subscriber::EnvFilter;

    let log_dir = state_dir.join("logs");
    std::fs::create_dir_all(&log_dir)?;
    let appender = tracing_appender::rolling::never(&log_dir, HOOK_LOG);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))
}
