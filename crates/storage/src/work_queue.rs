// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work queue: task CRUD and priority selection over a record store
//!
//! Reads fail open: an unreadable or corrupt store behaves as an empty
//! queue so the daemon keeps running. Mutations surface every storage
//! error to the caller.

use crate::json_store::JsonFileStore;
use crate::store::{QueueStore, StoreError};
use crate::summary::render_summary;
use hive_core::{
    queue, Clock, IdGen, Priority, SystemClock, Task, TaskError, TaskEvent, TaskId, UuidIdGen,
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error(transparent)]
    InvalidTransition(#[from] TaskError),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

pub struct WorkQueue<S, C = SystemClock, G = UuidIdGen> {
    store: S,
    clock: C,
    ids: G,
    mirror: Option<PathBuf>,
}

impl WorkQueue<JsonFileStore> {
    /// Queue backed by a JSON file, mirrored to a sibling `.md` file
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = JsonFileStore::new(path);
        let mirror = store.mirror_path();
        WorkQueue::new(store, SystemClock, UuidIdGen).with_mirror(mirror)
    }
}

impl<S: QueueStore, C: Clock, G: IdGen> WorkQueue<S, C, G> {
    pub fn new(store: S, clock: C, ids: G) -> Self {
        Self {
            store,
            clock,
            ids,
            mirror: None,
        }
    }

    pub fn with_mirror(mut self, path: impl Into<PathBuf>) -> Self {
        self.mirror = Some(path.into());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add(
        &self,
        description: impl Into<String>,
        priority: Priority,
        source: impl Into<String>,
    ) -> Result<Task, QueueError> {
        let description = description.into();
        let source = source.into();
        let task = self.mutate(|tasks| {
            let mut id = self.ids.next();
            while tasks.iter().any(|t| t.id.as_str() == id) {
                id = self.ids.next();
            }
            let task = Task::new(id, description, priority, source, &self.clock);
            tasks.push(task.clone());
            Ok(task)
        })?;
        tracing::info!(task_id = %task.id, priority = %task.priority, source = %task.source, "task added");
        Ok(task)
    }

    /// Highest-priority pending task, oldest first within a priority band
    pub fn get_next(&self) -> Option<Task> {
        queue::select_next(&self.snapshot()).cloned()
    }

    pub fn start(&self, id: &TaskId) -> Result<Task, QueueError> {
        self.transition(id, TaskEvent::Start)
    }

    pub fn complete(&self, id: &TaskId, result: impl Into<String>) -> Result<Task, QueueError> {
        self.transition(
            id,
            TaskEvent::Complete {
                result: result.into(),
            },
        )
    }

    pub fn fail(&self, id: &TaskId, error: impl Into<String>) -> Result<Task, QueueError> {
        self.transition(
            id,
            TaskEvent::Fail {
                error: error.into(),
            },
        )
    }

    pub fn list_all(&self) -> Vec<Task> {
        self.snapshot()
    }

    pub fn list_pending(&self) -> Vec<Task> {
        queue::pending(&self.snapshot())
    }

    /// Remove completed and failed tasks; returns how many were removed
    pub fn clear_completed(&self) -> Result<usize, QueueError> {
        let removed = self.mutate(|tasks| Ok(queue::purge_terminal(tasks)))?;
        tracing::info!(removed, "cleared finished tasks");
        Ok(removed)
    }

    fn transition(&self, id: &TaskId, event: TaskEvent) -> Result<Task, QueueError> {
        let task = self.mutate(|tasks| {
            let slot = tasks
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| QueueError::TaskNotFound(id.clone()))?;
            let next = slot.transition(event, &self.clock)?;
            *slot = next.clone();
            Ok(next)
        })?;
        tracing::debug!(task_id = %task.id, status = %task.status, "task updated");
        Ok(task)
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<Task>) -> Result<T, QueueError>,
    ) -> Result<T, QueueError> {
        let (out, snapshot) = self.store.update(|tasks| {
            let out = f(tasks)?;
            Ok::<_, QueueError>((out, tasks.clone()))
        })?;
        self.write_mirror(&snapshot);
        Ok(out)
    }

    fn snapshot(&self) -> Vec<Task> {
        match self.store.load() {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(error = %e, "queue store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_mirror(&self, tasks: &[Task]) {
        let Some(path) = &self.mirror else {
            return;
        };
        let content = render_summary(tasks, self.clock.now());
        if let Err(e) = std::fs::write(path, content) {
            tracing::warn!(path = %path.display(), error = %e, "failed to write queue summary");
        }
    }
}

#[cfg(test)]
#[path = "work_queue_tests.rs"]
mod tests;
