// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative shutdown: a watch flag flipped by signals or by a loop that
//! decided to stop.

use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;

/// Sleep for `duration`, returning early with `true` if shutdown is
/// requested.
pub async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    let sleep = tokio::time::sleep(duration);
    tokio::pin!(sleep);
    let requested = tokio::select! {
        _ = &mut sleep => return false,
        stopped = shutdown.wait_for(|stop| *stop) => stopped.is_ok(),
    };
    if requested {
        return true;
    }
    // Sender gone: nobody can ask us to stop any more
    sleep.await;
    false
}

/// Flip `tx` on SIGTERM or SIGINT
pub fn listen_for_signals(tx: Arc<watch::Sender<bool>>) -> std::io::Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => tracing::info!("received SIGTERM, finishing current work"),
            _ = sigint.recv() => tracing::info!("received SIGINT, finishing current work"),
        }
        tx.send_replace(true);
    });
    Ok(())
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;
