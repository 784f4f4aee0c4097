// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hive-storage: persisted work queue

mod json_store;
mod store;
mod summary;
mod work_queue;

pub use json_store::JsonFileStore;
pub use store::{MemoryStore, QueueStore, StoreError};
pub use summary::render_summary;
pub use work_queue::{QueueError, WorkQueue};
