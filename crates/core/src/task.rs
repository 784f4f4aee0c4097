// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task state machine
//!
//! A task is a unit of work queued for the autonomous worker. Its status
//! only moves forward: Pending → InProgress → {Completed, Failed}. The two
//! terminal states are absorbing; any other transition is rejected and
//! leaves the task untouched.

use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// Task priority; declaration order is the selection order (Urgent wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Urgent,
    ];

    /// Numeric rank, 1 (low) through 4 (urgent)
    pub fn value(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Normal => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!(
                "unknown priority: {} (expected low, normal, high or urgent)",
                s
            )),
        }
    }
}

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Events that move a task through its lifecycle
#[derive(Clone, Debug)]
pub enum TaskEvent {
    /// Worker picked the task up
    Start,
    /// Agent returned a result
    Complete { result: String },
    /// Agent (or bookkeeping) failed
    Fail { error: String },
}

impl TaskEvent {
    fn name(&self) -> &'static str {
        match self {
            TaskEvent::Start => "start",
            TaskEvent::Complete { .. } => "complete",
            TaskEvent::Fail { .. } => "fail",
        }
    }
}

/// Rejected lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("cannot {event} task {id}: status is {from}")]
    InvalidTransition {
        id: TaskId,
        from: TaskStatus,
        event: &'static str,
    },
}

/// A unit of work in the queue
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Free-text origin tag ("cli", "slack", a routine name...)
    pub source: String,
}

impl Task {
    /// Create a new task in the Pending state
    pub fn new(
        id: impl Into<TaskId>,
        description: impl Into<String>,
        priority: Priority,
        source: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Task {
            id: id.into(),
            description: description.into(),
            priority,
            status: TaskStatus::Pending,
            created_at: clock.now(),
            started_at: None,
            completed_at: None,
            result: None,
            error: None,
            source: source.into(),
        }
    }

    /// Pure transition function: the updated task, or an error if the
    /// event is not allowed from the current status.
    pub fn transition(&self, event: TaskEvent, clock: &impl Clock) -> Result<Task, TaskError> {
        let now = clock.now();

        match (self.status, event) {
            (TaskStatus::Pending, TaskEvent::Start) => Ok(Task {
                status: TaskStatus::InProgress,
                started_at: Some(self.started_at.unwrap_or(now)),
                ..self.clone()
            }),

            (TaskStatus::InProgress, TaskEvent::Complete { result }) => Ok(Task {
                status: TaskStatus::Completed,
                completed_at: Some(now),
                result: Some(result),
                ..self.clone()
            }),

            (TaskStatus::InProgress, TaskEvent::Fail { error }) => Ok(Task {
                status: TaskStatus::Failed,
                completed_at: Some(now),
                error: Some(error),
                ..self.clone()
            }),

            (from, event) => Err(TaskError::InvalidTransition {
                id: self.id.clone(),
                from,
                event: event.name(),
            }),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
