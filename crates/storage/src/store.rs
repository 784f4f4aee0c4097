// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record store abstraction for the work queue

use hive_core::Task;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode queue: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("queue store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Full-set task storage: every mutation loads all records, mutates them,
/// and writes them all back.
pub trait QueueStore: Send + Sync + 'static {
    /// Read every record
    fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Load, apply `f`, and persist, excluding other writers for the whole
    /// cycle. Nothing is written when `f` returns an error.
    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T, E>,
        E: From<StoreError>;
}

/// In-process store for tests and dry runs
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    tasks: Vec<Task>,
    fail_reads: bool,
    fail_writes: bool,
    failing_writes_left: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let store = Self::new();
        store.lock().tasks = tasks;
        store
    }

    /// Make subsequent loads fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.lock().fail_reads = fail;
    }

    /// Make subsequent writes fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Make only the next `count` writes fail
    pub fn fail_next_writes(&self, count: usize) {
        self.lock().failing_writes_left = count;
    }

    /// Records as stored, bypassing failure injection
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl QueueStore for MemoryStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(inner.tasks.clone())
    }

    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut inner = self.lock();
        if inner.fail_reads {
            return Err(StoreError::Unavailable("reads disabled".to_string()).into());
        }
        let mut tasks = inner.tasks.clone();
        let out = f(&mut tasks)?;
        if inner.failing_writes_left > 0 {
            inner.failing_writes_left -= 1;
            return Err(StoreError::Unavailable("writes disabled".to_string()).into());
        }
        if inner.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()).into());
        }
        inner.tasks = tasks;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
