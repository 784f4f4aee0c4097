// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling primitives for time-driven routines
//!
//! This module provides:
//! - **CronSchedule**: standard five-field cron expressions and the
//!   minute-boundary check used by the scheduler tick
//! - **Routine**: a named, cron-scheduled prompt template
//! - **RoutineRegistry**: the immutable, ordered catalog of routines

mod cron;
mod prompt;
mod routine;

#[cfg(test)]
#[path = "cron_tests.rs"]
mod cron_tests;

#[cfg(test)]
#[path = "routine_tests.rs"]
mod routine_tests;

pub use self::cron::{truncate_to_minute, CronError, CronSchedule};
pub use prompt::{render_prompt, time_context};
pub use routine::{Routine, RoutineConfig, RoutineError, RoutineRegistry};
