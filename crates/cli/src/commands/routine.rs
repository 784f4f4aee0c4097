// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routine commands: manual run and listing

use crate::context::Context;
use crate::error::HiveError;
use crate::output::{print_json, OutputFormat};
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use hive_adapters::{
    CommandAgentRunner, DiscordWebhookNotifier, NoOpNotifier, Notifier, TracedAgentRunner,
    TracedNotifier,
};
use hive_core::{Routine, RoutineRegistry, SystemClock};
use hive_daemon::{RoutineScheduler, TriggerOutcome};
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;

const RULE_WIDTH: usize = 60;

#[derive(clap::Args)]
pub struct RunArgs {
    /// Routine name
    pub routine: String,

    /// Print the result instead of posting it
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &Context, args: RunArgs) -> Result<()> {
    let registry = Arc::new(ctx.settings.routine_registry().map_err(HiveError::from)?);
    let routine = registry.get(&args.routine).map_err(HiveError::from)?.clone();

    let outcome = if args.dry_run {
        trigger(ctx, registry, NoOpNotifier::new(), &routine.name, true).await?
    } else {
        let notifier = TracedNotifier::new(DiscordWebhookNotifier::new(ctx.settings.notify.clone()));
        trigger(ctx, registry, notifier, &routine.name, false).await?
    };

    match outcome {
        TriggerOutcome::Completed { response, .. } if args.dry_run => {
            print!("{}", dry_run_frame(&routine, &response));
        }
        TriggerOutcome::Completed {
            response,
            delivered,
        } => {
            println!("{}", response);
            match (&routine.channel, delivered) {
                (Some(channel), true) => eprintln!("Posted to #{}", channel),
                (Some(channel), false) => {
                    eprintln!("warning: delivery to #{} failed, see log output", channel)
                }
                (None, _) => {}
            }
        }
        TriggerOutcome::Failed { error } => {
            return Err(HiveError::routine_failed(&routine.name, &error).into());
        }
        TriggerOutcome::AlreadyFired => {
            println!("Routine {} already ran this minute", routine.name);
        }
    }
    Ok(())
}

async fn trigger<N: Notifier>(
    ctx: &Context,
    registry: Arc<RoutineRegistry>,
    notifier: N,
    name: &str,
    dry_run: bool,
) -> Result<TriggerOutcome, HiveError> {
    let agent = TracedAgentRunner::new(CommandAgentRunner::from_settings(&ctx.settings.agent));
    let scheduler = RoutineScheduler::new(registry, agent, notifier, SystemClock);
    Ok(scheduler.trigger(name, dry_run).await?)
}

pub fn list(ctx: &Context, format: OutputFormat) -> Result<()> {
    let registry = ctx.settings.routine_registry().map_err(HiveError::from)?;
    let rows = routine_rows(&registry, &Local::now());
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Text => {
            print!("{}", format_routines(&rows));
            Ok(())
        }
    }
}

fn dry_run_frame(routine: &Routine, response: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\nROUTINE: {}\nCHANNEL: {}\n{rule}\n{}\n{rule}\n\n",
        routine.name,
        routine.channel.as_deref().unwrap_or("(none)"),
        response,
    )
}

#[derive(Debug, Serialize)]
struct RoutineRow {
    name: String,
    schedule: String,
    enabled: bool,
    channel: Option<String>,
    next_run: Option<String>,
}

fn routine_rows<Tz: TimeZone>(registry: &RoutineRegistry, now: &DateTime<Tz>) -> Vec<RoutineRow>
where
    Tz::Offset: Display,
{
    registry
        .iter()
        .map(|r| RoutineRow {
            name: r.name.clone(),
            schedule: r.schedule.expression().to_string(),
            enabled: r.enabled,
            channel: r.channel.clone(),
            next_run: r
                .enabled
                .then(|| r.schedule.next_after(now))
                .flatten()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
        })
        .collect()
}

fn format_routines(rows: &[RoutineRow]) -> String {
    if rows.is_empty() {
        return "No routines configured\n".to_string();
    }
    let mut out = String::from("Available routines:\n");
    for row in rows {
        let status = if row.enabled { "enabled" } else { "disabled" };
        out.push_str(&format!("  {}: {} ({})", row.name, row.schedule, status));
        if let Some(channel) = &row.channel {
            out.push_str(&format!(" -> #{}", channel));
        }
        if let Some(next) = &row.next_run {
            out.push_str(&format!(", next {}", next));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "routine_tests.rs"]
mod tests;
