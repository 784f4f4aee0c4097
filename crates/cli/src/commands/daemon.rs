// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run the daemon in the foreground

use crate::context::Context;
use anyhow::Result;
use hive_daemon::{Config, Mode, RunOptions, StopReason};

#[derive(clap::Args)]
pub struct DaemonArgs {
    /// Stop once the queue has nothing pending
    #[arg(long)]
    pub drain: bool,

    /// Run only the work queue loop
    #[arg(long, conflicts_with = "scheduler_only")]
    pub worker_only: bool,

    /// Run only the routine scheduler
    #[arg(long)]
    pub scheduler_only: bool,
}

impl DaemonArgs {
    fn options(&self) -> RunOptions {
        let mode = match (self.worker_only, self.scheduler_only) {
            (true, _) => Mode::WorkerOnly,
            (_, true) => Mode::SchedulerOnly,
            _ => Mode::Both,
        };
        RunOptions {
            mode,
            drain: self.drain,
        }
    }
}

pub async fn handle(ctx: &Context, args: DaemonArgs) -> Result<()> {
    let config = Config::for_state_dir(&ctx.state_dir).with_settings_path(&ctx.settings_path);
    let summary = hive_daemon::serve(config, args.options()).await?;

    if let Some(summary) = summary {
        println!(
            "Processed {} tasks, {} failed ({})",
            summary.processed, summary.failed, summary.reason
        );
        if summary.reason == StopReason::FailureCeiling {
            anyhow::bail!("daemon stopped after repeated task failures");
        }
    }
    Ok(())
}
