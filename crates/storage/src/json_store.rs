// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-backed queue store
//!
//! The record set is a single pretty-printed JSON array. Writers serialize
//! through an advisory lock on `<path>.lock` and replace the file by
//! renaming a fully written temp file over it, so readers never observe a
//! half-written store.

use crate::store::{QueueStore, StoreError};
use fs2::FileExt;
use hive_core::Task;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Human-readable mirror written next to the store
    pub fn mirror_path(&self) -> PathBuf {
        self.path.with_extension("md")
    }

    fn lock_path(&self) -> PathBuf {
        sibling(&self.path, ".lock")
    }

    fn read(&self) -> Result<Vec<Task>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        let tmp = sibling(&self.path, ".tmp");
        let mut file = File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Move a corrupt store aside so the next write starts clean
    fn quarantine(&self) -> Result<PathBuf, StoreError> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
        let dest = sibling(&self.path, &format!(".corrupt-{}", stamp));
        fs::rename(&self.path, &dest).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(dest)
    }

    fn acquire(&self) -> Result<File, StoreError> {
        let lock_path = self.lock_path();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io(&lock_path, e))?;
        file.lock_exclusive().map_err(|source| StoreError::Lock {
            path: lock_path,
            source,
        })?;
        Ok(file)
    }
}

impl QueueStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        self.read()
    }

    fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T, E>,
        E: From<StoreError>,
    {
        // Released when the handle is dropped
        let _lock = self.acquire()?;

        let mut tasks = match self.read() {
            Ok(tasks) => tasks,
            Err(StoreError::Corrupt { path, source }) => {
                let dest = self.quarantine()?;
                tracing::warn!(
                    path = %path.display(),
                    moved_to = %dest.display(),
                    error = %source,
                    "quarantined corrupt queue store"
                );
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let out = f(&mut tasks)?;
        self.write(&tasks)?;
        Ok(out)
    }
}

/// `path` with `suffix` appended to the file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("queue"));
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
