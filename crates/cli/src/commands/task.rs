// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work queue commands: add, list, pending, clear

use crate::context::Context;
use crate::output::{print_json, truncate, OutputFormat};
use anyhow::Result;
use hive_core::{Priority, Task};

const DESCRIPTION_WIDTH: usize = 30;

#[derive(clap::Args)]
pub struct AddArgs {
    /// What the agent should do
    pub description: String,

    /// low, normal, high or urgent
    #[arg(short, long, default_value = "normal")]
    pub priority: Priority,

    /// Where the task came from
    #[arg(short, long, default_value = "cli")]
    pub source: String,
}

pub fn add(ctx: &Context, args: AddArgs) -> Result<()> {
    let task = ctx
        .queue()
        .add(args.description, args.priority, args.source)?;
    println!("Added task: {}", task.id);
    println!("Description: {}", task.description);
    println!("Priority: {}", task.priority);
    Ok(())
}

pub fn list(ctx: &Context, format: OutputFormat) -> Result<()> {
    let tasks = ctx.queue().list_all();
    match format {
        OutputFormat::Json => print_json(&tasks),
        OutputFormat::Text => {
            print!("{}", format_table(&tasks));
            Ok(())
        }
    }
}

pub fn pending(ctx: &Context, format: OutputFormat) -> Result<()> {
    let tasks = by_priority(ctx.queue().list_pending());
    match format {
        OutputFormat::Json => print_json(&tasks),
        OutputFormat::Text => {
            print!("{}", format_pending(&tasks));
            Ok(())
        }
    }
}

pub fn clear(ctx: &Context) -> Result<()> {
    let removed = ctx.queue().clear_completed()?;
    println!("Cleared {} completed and failed tasks", removed);
    Ok(())
}

/// Highest priority first; insertion order within a priority
fn by_priority(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
    tasks
}

fn format_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks in queue\n".to_string();
    }
    let mut out = format!(
        "{:<40} {:<12} {:<8} {}\n{}\n",
        "ID",
        "STATUS",
        "PRIORITY",
        "DESCRIPTION",
        "-".repeat(80)
    );
    for task in tasks {
        out.push_str(&format!(
            "{:<40} {:<12} {:<8} {}\n",
            task.id.as_str(),
            task.status.to_string(),
            task.priority.to_string(),
            truncate(&task.description, DESCRIPTION_WIDTH)
        ));
    }
    out
}

fn format_pending(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No pending tasks\n".to_string();
    }
    let mut out = format!("{:<8} {}\n{}\n", "PRIORITY", "DESCRIPTION", "-".repeat(60));
    for task in tasks {
        out.push_str(&format!(
            "{:<8} {}\n",
            task.priority.to_string(),
            task.description
        ));
    }
    out
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
