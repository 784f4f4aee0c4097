// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work queue selection rules
//!
//! Pure functions over a task record set. Persistence lives in
//! `hive-storage`; these rules are shared by every store.

use crate::task::{Task, TaskStatus};
use std::cmp::Ordering;

/// Selection order: highest priority first, then oldest `created_at`.
pub fn selection_order(a: &Task, b: &Task) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.created_at.cmp(&b.created_at))
}

/// The pending task that should run next, if any.
///
/// Ties on both priority and `created_at` resolve to the earlier record.
pub fn select_next(tasks: &[Task]) -> Option<&Task> {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Pending)
        .min_by(|a, b| selection_order(a, b))
}

/// Pending tasks in insertion order
pub fn pending(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| t.is_pending()).cloned().collect()
}

/// Drop every terminal task, returning how many were removed
pub fn purge_terminal(tasks: &mut Vec<Task>) -> usize {
    let before = tasks.len();
    tasks.retain(|t| !t.is_terminal());
    before - tasks.len()
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
