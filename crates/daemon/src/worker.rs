// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Autonomous daemon: drains the work queue one task at a time
//!
//! Each iteration takes the next pending task, marks it started, hands its
//! description to the agent, and records the outcome. Task failures are
//! recorded and absorbed; only a run of consecutive failures stops the
//! loop. Shutdown requests are honored between tasks, never mid-task.

use crate::shutdown::sleep_or_shutdown;
use hive_adapters::AgentRunner;
use hive_core::config::DaemonSettings;
use hive_core::{Clock, IdGen, Task};
use hive_storage::{QueueStore, WorkQueue};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub idle_interval: Duration,
    pub task_interval: Duration,
    pub max_consecutive_failures: u32,
    /// Stop once the queue has nothing pending
    pub drain: bool,
}

impl From<&DaemonSettings> for WorkerConfig {
    fn from(settings: &DaemonSettings) -> Self {
        Self {
            idle_interval: settings.idle_interval,
            task_interval: settings.task_interval,
            max_consecutive_failures: settings.max_consecutive_failures,
            drain: false,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::from(&DaemonSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonState {
    Stopped,
    Running,
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown was requested
    Shutdown,
    /// Too many consecutive task failures
    FailureCeiling,
    /// Drain mode found the queue empty
    Drained,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Shutdown => write!(f, "shutdown requested"),
            StopReason::FailureCeiling => write!(f, "consecutive failure ceiling reached"),
            StopReason::Drained => write!(f, "queue drained"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub runtime: Duration,
    pub processed: u64,
    pub failed: u64,
    pub reason: StopReason,
}

impl RunSummary {
    fn log(&self) {
        let runtime_secs = self.runtime.as_secs();
        match self.reason {
            StopReason::FailureCeiling => tracing::error!(
                runtime_secs,
                processed = self.processed,
                failed = self.failed,
                reason = %self.reason,
                "autonomous daemon stopped"
            ),
            StopReason::Shutdown | StopReason::Drained => tracing::info!(
                runtime_secs,
                processed = self.processed,
                failed = self.failed,
                reason = %self.reason,
                "autonomous daemon stopped"
            ),
        }
    }
}

pub struct AutonomousDaemon<S, C, G, A> {
    queue: Arc<WorkQueue<S, C, G>>,
    agent: A,
    config: WorkerConfig,
    state: DaemonState,
    consecutive_failures: u32,
    processed: u64,
    failed: u64,
}

impl<S, C, G, A> AutonomousDaemon<S, C, G, A>
where
    S: QueueStore,
    C: Clock,
    G: IdGen,
    A: AgentRunner,
{
    pub fn new(queue: Arc<WorkQueue<S, C, G>>, agent: A, config: WorkerConfig) -> Self {
        Self {
            queue,
            agent,
            config,
            state: DaemonState::Stopped,
            consecutive_failures: 0,
            processed: 0,
            failed: 0,
        }
    }

    pub fn state(&self) -> DaemonState {
        self.state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Run until shutdown, the failure ceiling, or (in drain mode) an
    /// empty queue. The summary is logged once before returning.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> RunSummary {
        self.state = DaemonState::Running;
        let started = Instant::now();
        tracing::info!(
            idle_secs = self.config.idle_interval.as_secs(),
            task_secs = self.config.task_interval.as_secs(),
            max_failures = self.config.max_consecutive_failures,
            drain = self.config.drain,
            "autonomous daemon started"
        );

        let reason = loop {
            if *shutdown.borrow() {
                break StopReason::Shutdown;
            }

            let Some(task) = self.queue.get_next() else {
                if self.config.drain {
                    break StopReason::Drained;
                }
                tracing::debug!("no pending tasks");
                if sleep_or_shutdown(self.config.idle_interval, &mut shutdown).await {
                    break StopReason::Shutdown;
                }
                continue;
            };

            self.process(&task).await;

            if self.consecutive_failures >= self.config.max_consecutive_failures {
                break StopReason::FailureCeiling;
            }
            if sleep_or_shutdown(self.config.task_interval, &mut shutdown).await {
                break StopReason::Shutdown;
            }
        };

        self.state = DaemonState::Stopped;
        let summary = RunSummary {
            runtime: started.elapsed(),
            processed: self.processed,
            failed: self.failed,
            reason,
        };
        summary.log();
        summary
    }

    /// Take one task through start, agent, and outcome recording
    pub async fn process(&mut self, task: &Task) {
        tracing::info!(task_id = %task.id, priority = %task.priority, "processing task");
        match self.execute(task).await {
            Ok(()) => {
                self.consecutive_failures = 0;
                self.processed += 1;
                tracing::info!(task_id = %task.id, "task completed");
            }
            Err(error) => {
                self.consecutive_failures += 1;
                self.failed += 1;
                tracing::warn!(
                    task_id = %task.id,
                    error = %error,
                    consecutive = self.consecutive_failures,
                    "task failed"
                );
            }
        }
    }

    async fn execute(&self, task: &Task) -> Result<(), String> {
        self.queue.start(&task.id).map_err(|e| e.to_string())?;

        match self.agent.invoke(&task.description).await {
            Ok(result) => match self.queue.complete(&task.id, result) {
                Ok(_) => Ok(()),
                Err(e) => {
                    let message = format!("failed to record result: {}", e);
                    if let Err(record) = self.queue.fail(&task.id, &message) {
                        tracing::error!(task_id = %task.id, error = %record, "task left in progress");
                    }
                    Err(message)
                }
            },
            Err(e) => {
                let message = e.to_string();
                if let Err(record) = self.queue.fail(&task.id, &message) {
                    tracing::error!(task_id = %task.id, error = %record, "failed to record task failure");
                }
                Err(message)
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
