// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! hive - work queue and routine CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod completions;
mod context;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{daemon, hook, routine, task};
use completions::CompletionsArgs;
use context::Context;
use error::HiveError;
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "hive",
    version,
    about = "Hive - autonomous work queue and scheduled routines"
)]
struct Cli {
    /// Settings file (default: <state dir>/hive.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task to the work queue
    Add(task::AddArgs),
    /// List all tasks, or routines with --routines
    List {
        /// List configured routines instead of tasks
        #[arg(long)]
        routines: bool,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List pending tasks by priority
    Pending {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Remove completed and failed tasks
    Clear,
    /// Run a routine now
    Run(routine::RunArgs),
    /// Run the daemon in the foreground
    Daemon(daemon::DaemonArgs),
    /// Answer an agent hook event (JSON on stdin)
    Hook,
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The daemon and the hook endpoint install their own subscribers
    if !matches!(
        cli.command,
        Commands::Daemon(_) | Commands::Hook | Commands::Completions(_)
    ) {
        setup_logging();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HiveError>() {
                Some(hive) => eprint!("{}", hive),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions(args) = cli.command {
        completions::generate_completions::<Cli>(args.shell);
        return Ok(());
    }

    let ctx = Context::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Add(args) => task::add(&ctx, args),
        Commands::List {
            routines: true,
            format,
        } => routine::list(&ctx, format),
        Commands::List { format, .. } => task::list(&ctx, format),
        Commands::Pending { format } => task::pending(&ctx, format),
        Commands::Clear => task::clear(&ctx),
        Commands::Run(args) => routine::run(&ctx, args).await,
        Commands::Daemon(args) => daemon::handle(&ctx, args).await,
        Commands::Hook => hook::handle(&ctx),
        Commands::Completions(_) => Ok(()),
    }
}

pub(crate) fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
