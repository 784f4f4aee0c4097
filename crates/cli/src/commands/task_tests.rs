// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use hive_core::{FakeClock, TaskStatus};

fn task(id: &str, description: &str, priority: Priority) -> Task {
    Task::new(id, description, priority, "test", &FakeClock::new())
}

#[test]
fn empty_queue_messages() {
    assert_eq!(format_table(&[]), "No tasks in queue\n");
    assert_eq!(format_pending(&[]), "No pending tasks\n");
}

#[test]
fn table_truncates_long_descriptions() {
    let mut done = task("task-2", "Summarize every meeting from last week in detail", Priority::High);
    done.status = TaskStatus::Completed;
    let out = format_table(&[task("task-1", "Write report", Priority::Normal), done]);
    let lines: Vec<_> = out.lines().collect();

    assert!(lines[0].starts_with("ID"));
    assert!(lines[0].ends_with("DESCRIPTION"));
    assert_eq!(lines[1], "-".repeat(80));
    assert!(lines[2].starts_with("task-1"));
    assert!(lines[2].contains("pending"));
    assert!(lines[2].ends_with("normal   Write report"));
    assert!(lines[3].contains("completed"));
    assert!(lines[3].ends_with("Summarize every meeting from l"));
}

#[test]
fn pending_sorted_by_priority_stable() {
    let tasks = by_priority(vec![
        task("a", "first low", Priority::Low),
        task("b", "urgent one", Priority::Urgent),
        task("c", "second low", Priority::Low),
        task("d", "normal one", Priority::Normal),
    ]);
    let order: Vec<_> = tasks.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(order, vec!["urgent one", "normal one", "first low", "second low"]);

    let out = format_pending(&tasks);
    assert_eq!(out.lines().nth(2), Some("urgent   urgent one"));
}
