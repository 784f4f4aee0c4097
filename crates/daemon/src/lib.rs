// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hive-daemon: the autonomous worker and the routine scheduler
//!
//! Both loops run side by side in one process (or one each, with
//! `--worker-only` / `--scheduler-only`) and stop cooperatively on a shared
//! shutdown flag.

pub mod lifecycle;
pub mod logging;
pub mod scheduler;
mod shutdown;
pub mod worker;

pub use lifecycle::{drive, run, serve, Config, LifecycleError, Mode, RoleLock, RunOptions};
pub use scheduler::{RoutineScheduler, TriggerOutcome};
pub use shutdown::{listen_for_signals, sleep_or_shutdown};
pub use worker::{AutonomousDaemon, DaemonState, RunSummary, StopReason, WorkerConfig};
