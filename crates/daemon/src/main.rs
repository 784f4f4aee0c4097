// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hive daemon (hived)
//!
//! Background process that drains the work queue and fires scheduled
//! routines until signalled.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use hive_daemon::{serve, Config, Mode, RunOptions};

const USAGE: &str = "usage: hived [--drain] [--worker-only | --scheduler-only] [--config <path>]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut options = RunOptions::default();
    let mut settings_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--drain" => options.drain = true,
            "--worker-only" => options.mode = Mode::WorkerOnly,
            "--scheduler-only" => options.mode = Mode::SchedulerOnly,
            "--config" => settings_path = Some(args.next().ok_or(USAGE)?),
            "--version" => {
                println!("hived {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => return Err(format!("unexpected argument '{}'\n{}", arg, USAGE).into()),
        }
    }

    let mut config = Config::load()?;
    if let Some(path) = settings_path {
        config = config.with_settings_path(path);
    }

    serve(config, options).await?;
    Ok(())
}
