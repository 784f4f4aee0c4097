// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test(start_paused = true)]
async fn sleeps_full_duration_without_shutdown() {
    let (_tx, mut rx) = watch::channel(false);
    let start = tokio::time::Instant::now();
    assert!(!sleep_or_shutdown(Duration::from_secs(60), &mut rx).await);
    assert!(start.elapsed() >= Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn wakes_early_on_shutdown() {
    let (tx, mut rx) = watch::channel(false);
    let start = tokio::time::Instant::now();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send_replace(true);
    });
    assert!(sleep_or_shutdown(Duration::from_secs(60), &mut rx).await);
    assert!(start.elapsed() < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn already_stopped_returns_immediately() {
    let (_tx, mut rx) = watch::channel(true);
    assert!(sleep_or_shutdown(Duration::from_secs(60), &mut rx).await);
}

#[tokio::test(start_paused = true)]
async fn dropped_sender_still_sleeps() {
    let (tx, mut rx) = watch::channel(false);
    drop(tx);
    let start = tokio::time::Instant::now();
    assert!(!sleep_or_shutdown(Duration::from_secs(10), &mut rx).await);
    assert!(start.elapsed() >= Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn runs_on_a_spawned_task() {
    let (tx, mut rx) = watch::channel(false);
    let handle = tokio::spawn(async move { sleep_or_shutdown(Duration::from_secs(60), &mut rx).await });
    tokio::time::sleep(Duration::from_secs(1)).await;
    tx.send_replace(true);
    assert!(handle.await.unwrap());
}
