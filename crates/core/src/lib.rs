// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! hive-core: Core types for the hive task orchestrator
//!
//! This crate provides:
//! - The task lifecycle state machine and queue selection order
//! - Cron schedules, routines and the routine registry
//! - Agent hook events and handlers
//! - Settings loaded from `hive.toml`

pub mod clock;
pub mod config;
pub mod hooks;
pub mod id;
pub mod queue;
pub mod scheduling;
pub mod task;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, Settings};
pub use hooks::{Decision, HookChain, HookHandler, Permission, ToolEvent};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use scheduling::{CronSchedule, Routine, RoutineConfig, RoutineError, RoutineRegistry};
pub use task::{Priority, Task, TaskError, TaskEvent, TaskId, TaskStatus};
