// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle: state paths, role locks, startup, and running the
//! worker and scheduler loops side by side.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use hive_adapters::{
    AgentRunner, CommandAgentRunner, DiscordWebhookNotifier, Notifier, TracedAgentRunner,
    TracedNotifier,
};
use hive_core::config::{self, SETTINGS_FILE};
use hive_core::{Clock, ConfigError, IdGen, Settings, SystemClock};
use hive_storage::{QueueStore, WorkQueue};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

use crate::logging;
use crate::scheduler::RoutineScheduler;
use crate::shutdown::listen_for_signals;
use crate::worker::{AutonomousDaemon, RunSummary, WorkerConfig};

/// Daemon paths, all under one state directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
    pub worker_lock_path: PathBuf,
    pub scheduler_lock_path: PathBuf,
}

impl Config {
    /// Config for the default state directory
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self::for_state_dir(&config::state_dir()?))
    }

    pub fn for_state_dir(state_dir: &Path) -> Self {
        Self {
            state_dir: state_dir.to_path_buf(),
            settings_path: state_dir.join(SETTINGS_FILE),
            log_path: state_dir.join("logs").join("daemon.log"),
            worker_lock_path: state_dir.join("worker.pid"),
            scheduler_lock_path: state_dir.join("scheduler.pid"),
        }
    }

    /// Read settings from `path` instead of `<state_dir>/hive.toml`
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("could not determine state directory")]
    NoStateDir,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{role} already running? lock held on {}", path.display())]
    LockFailed {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set up logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exclusive pid lock for one daemon role. The pid file is removed on drop.
pub struct RoleLock {
    path: PathBuf,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    file: File,
}

impl RoleLock {
    pub fn acquire(role: &'static str, path: &Path) -> Result<Self, LifecycleError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Truncate only after the lock is ours, so a running holder keeps its pid
        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        file.try_lock_exclusive()
            .map_err(|source| LifecycleError::LockFailed {
                role,
                path: path.to_path_buf(),
                source,
            })?;
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        info!(role, path = %path.display(), "acquired role lock");
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl Drop for RoleLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove pid file");
        }
    }
}

/// Which loops this process runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Both,
    WorkerOnly,
    SchedulerOnly,
}

impl Mode {
    pub fn runs_worker(self) -> bool {
        matches!(self, Mode::Both | Mode::WorkerOnly)
    }

    pub fn runs_scheduler(self) -> bool {
        matches!(self, Mode::Both | Mode::SchedulerOnly)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: Mode,
    /// Stop the worker once the queue is empty
    pub drain: bool,
}

/// Process entry point: startup marker, logging, settings, signals, then
/// [`run`]. Returns the worker summary when the worker ran.
pub async fn serve(config: Config, options: RunOptions) -> Result<Option<RunSummary>, LifecycleError> {
    logging::write_startup_marker(&config.log_path)?;
    let _log_guard = logging::setup_logging(&config.log_path)?;

    info!(
        state_dir = %config.state_dir.display(),
        mode = ?options.mode,
        drain = options.drain,
        "starting hived"
    );

    let (tx, _rx) = watch::channel(false);
    let tx = Arc::new(tx);

    let result = async {
        let settings = Settings::load(&config.settings_path)?;
        listen_for_signals(Arc::clone(&tx))?;
        run(&config, &settings, options, &tx).await
    }
    .await;

    match &result {
        Ok(_) => info!("hived stopped"),
        Err(e) => {
            logging::write_startup_error(&config.log_path, e);
            error!(error = %e, "failed to start daemon");
        }
    }
    result
}

/// Acquire role locks, wire the production adapters, and run until the
/// loops stop. Fails only during startup.
pub async fn run(
    config: &Config,
    settings: &Settings,
    options: RunOptions,
    shutdown: &watch::Sender<bool>,
) -> Result<Option<RunSummary>, LifecycleError> {
    // Validate routines even when the scheduler is not running here
    let registry = Arc::new(settings.routine_registry()?);

    let _worker_lock = options
        .mode
        .runs_worker()
        .then(|| RoleLock::acquire("worker", &config.worker_lock_path))
        .transpose()?;
    let _scheduler_lock = options
        .mode
        .runs_scheduler()
        .then(|| RoleLock::acquire("scheduler", &config.scheduler_lock_path))
        .transpose()?;

    let agent = TracedAgentRunner::new(CommandAgentRunner::from_settings(&settings.agent));

    let worker = options.mode.runs_worker().then(|| {
        let queue_path = settings.queue_path(&config.state_dir);
        info!(queue = %queue_path.display(), "opening work queue");
        let queue = Arc::new(WorkQueue::open(queue_path));
        let worker_config = WorkerConfig {
            drain: options.drain,
            ..WorkerConfig::from(&settings.daemon)
        };
        AutonomousDaemon::new(queue, agent.clone(), worker_config)
    });

    let scheduler = options.mode.runs_scheduler().then(|| {
        let notifier = TracedNotifier::new(DiscordWebhookNotifier::new(settings.notify.clone()));
        RoutineScheduler::new(registry, agent.clone(), notifier, SystemClock)
    });

    Ok(drive(worker, scheduler, shutdown).await)
}

/// Run whichever loops are present until both have stopped. A worker that
/// stops on its own (drained, failure ceiling) flips `shutdown` so the
/// scheduler follows it.
pub async fn drive<S, C, G, A, B, N, K>(
    worker: Option<AutonomousDaemon<S, C, G, A>>,
    scheduler: Option<RoutineScheduler<B, N, K>>,
    shutdown: &watch::Sender<bool>,
) -> Option<RunSummary>
where
    S: QueueStore,
    C: Clock,
    G: IdGen,
    A: AgentRunner,
    B: AgentRunner,
    N: Notifier,
    K: Clock,
{
    let worker_loop = async {
        let mut worker = worker?;
        let summary = worker.run(shutdown.subscribe()).await;
        shutdown.send_replace(true);
        Some(summary)
    };
    let scheduler_loop = async {
        if let Some(scheduler) = &scheduler {
            scheduler.run(shutdown.subscribe()).await;
        }
    };
    let (summary, ()) = tokio::join!(worker_loop, scheduler_loop);
    summary
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
