// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown mirror of the queue for operators
//!
//! A projection only; it is regenerated after every mutation and never read
//! back.

use chrono::{DateTime, SecondsFormat, Utc};
use hive_core::{Task, TaskStatus};

const RECENT_COMPLETED: usize = 5;
const RECENT_FAILED: usize = 3;

pub fn render_summary(tasks: &[Task], now: DateTime<Utc>) -> String {
    let mut lines = vec![
        "# Work Queue".to_string(),
        String::new(),
        format!("Last updated: {}", timestamp(now)),
        String::new(),
    ];

    let in_progress = with_status(tasks, TaskStatus::InProgress);
    if !in_progress.is_empty() {
        lines.push("## In Progress".to_string());
        for t in in_progress {
            let started = t.started_at.map(timestamp);
            lines.push(format!(
                "- [ ] **{}** (started {})",
                t.description,
                started.as_deref().unwrap_or("unknown")
            ));
        }
        lines.push(String::new());
    }

    let mut pending = with_status(tasks, TaskStatus::Pending);
    if !pending.is_empty() {
        pending.sort_by(|a, b| b.priority.cmp(&a.priority));
        lines.push("## Pending".to_string());
        for t in pending {
            lines.push(format!("- [ ] {} ({})", t.description, t.priority));
        }
        lines.push(String::new());
    }

    let completed = with_status(tasks, TaskStatus::Completed);
    if !completed.is_empty() {
        lines.push("## Completed".to_string());
        for t in last(&completed, RECENT_COMPLETED) {
            lines.push(format!("- [x] {}", t.description));
        }
        lines.push(String::new());
    }

    let failed = with_status(tasks, TaskStatus::Failed);
    if !failed.is_empty() {
        lines.push("## Failed".to_string());
        for t in last(&failed, RECENT_FAILED) {
            lines.push(format!(
                "- [!] {} - {}",
                t.description,
                t.error.as_deref().unwrap_or("unknown error")
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

fn with_status(tasks: &[Task], status: TaskStatus) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status == status).collect()
}

fn last<'a>(tasks: &'a [&'a Task], n: usize) -> &'a [&'a Task] {
    &tasks[tasks.len().saturating_sub(n)..]
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
