// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routine scheduler: fires cron-scheduled routines once per matching minute
//!
//! Every tick evaluates enabled routines in registry order. A routine that
//! is due runs to completion before the next one is considered. The fire
//! record (routine name to minute) is claimed before the agent is called,
//! so a second tick or a manual trigger in the same minute is a no-op even
//! while the first run is still in flight.

use crate::shutdown::sleep_or_shutdown;
use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use hive_adapters::{AgentRunner, Notifier};
use hive_core::scheduling::{render_prompt, truncate_to_minute};
use hive_core::{Clock, Routine, RoutineError, RoutineRegistry};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// Result of one routine trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The agent answered. `delivered` is false for dry runs, routines
    /// without a channel, and failed deliveries.
    Completed { response: String, delivered: bool },
    /// Agent or prompt failure, already logged
    Failed { error: String },
    /// Already fired in this minute
    AlreadyFired,
}

pub struct RoutineScheduler<A, N, C> {
    registry: Arc<RoutineRegistry>,
    agent: A,
    notifier: N,
    clock: C,
    fired: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl<A, N, C> RoutineScheduler<A, N, C>
where
    A: AgentRunner,
    N: Notifier,
    C: Clock,
{
    pub fn new(registry: Arc<RoutineRegistry>, agent: A, notifier: N, clock: C) -> Self {
        Self {
            registry,
            agent,
            notifier,
            clock,
            fired: Mutex::new(HashMap::new()),
        }
    }

    pub fn registry(&self) -> &RoutineRegistry {
        &self.registry
    }

    /// Tick until shutdown, waking at each minute boundary
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            routines = self.registry.len(),
            enabled = self.registry.enabled().count(),
            "routine scheduler started"
        );
        loop {
            self.tick().await;
            let wait = until_next_minute(&self.clock.now());
            if sleep_or_shutdown(wait, &mut shutdown).await {
                break;
            }
        }
        tracing::info!("routine scheduler stopped");
    }

    /// Evaluate every enabled routine against the local wall clock
    pub async fn tick(&self) -> Vec<(String, TriggerOutcome)> {
        let now = self.clock.now().with_timezone(&Local);
        self.tick_at(&now).await
    }

    /// Evaluate every enabled routine against `now`; returns the routines
    /// that were due, with what happened to each
    pub async fn tick_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<(String, TriggerOutcome)>
    where
        Tz::Offset: Display + Send + Sync,
    {
        let mut results = Vec::new();
        for routine in self.registry.enabled() {
            if !routine.schedule.fires_at(now) {
                continue;
            }
            let outcome = self.fire(routine, now, false).await;
            results.push((routine.name.clone(), outcome));
        }
        results
    }

    /// Run a routine now, regardless of its schedule or enabled flag. Still
    /// subject to the once-per-minute fire record.
    pub async fn trigger(&self, name: &str, dry_run: bool) -> Result<TriggerOutcome, RoutineError> {
        let routine = self.registry.get(name)?;
        let now = self.clock.now().with_timezone(&Local);
        Ok(self.fire(routine, &now, dry_run).await)
    }

    async fn fire<Tz: TimeZone>(
        &self,
        routine: &Routine,
        now: &DateTime<Tz>,
        dry_run: bool,
    ) -> TriggerOutcome
    where
        Tz::Offset: Display + Send + Sync,
    {
        let minute = truncate_to_minute(now).with_timezone(&Utc);
        if !self.claim(&routine.name, minute) {
            tracing::debug!(routine = routine.name.as_str(), "already fired this minute");
            return TriggerOutcome::AlreadyFired;
        }
        tracing::info!(routine = routine.name.as_str(), dry_run, "triggering routine");

        let prompt = match render_prompt(routine, now) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(routine = routine.name.as_str(), error = %e, "prompt failed");
                return TriggerOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let response = match self.agent.invoke(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(routine = routine.name.as_str(), error = %e, "routine failed");
                return TriggerOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let delivered = match (&routine.channel, dry_run) {
            (Some(channel), false) => match self.notifier.send(channel, &response).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(
                        routine = routine.name.as_str(),
                        channel = channel.as_str(),
                        error = %e,
                        "delivery failed, result kept in log"
                    );
                    false
                }
            },
            _ => false,
        };

        tracing::info!(
            routine = routine.name.as_str(),
            response_len = response.len(),
            delivered,
            "routine finished"
        );
        TriggerOutcome::Completed {
            response,
            delivered,
        }
    }

    /// Record `minute` for `name`; false if it was already recorded
    fn claim(&self, name: &str, minute: DateTime<Utc>) -> bool {
        let mut fired = self.fired.lock().unwrap_or_else(|e| e.into_inner());
        if fired.get(name) == Some(&minute) {
            return false;
        }
        fired.insert(name.to_string(), minute);
        true
    }
}

/// Time left until the next minute boundary
fn until_next_minute(now: &DateTime<Utc>) -> Duration {
    let into_minute = Duration::from_secs(u64::from(now.second()))
        + Duration::from_nanos(u64::from(now.nanosecond() % 1_000_000_000));
    Duration::from_secs(60).saturating_sub(into_minute)
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
