// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notifier for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{chunk_message, Notifier, NotifyError, MESSAGE_LIMIT};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recorded delivery, one per chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyCall {
    pub channel: String,
    pub message: String,
}

/// Fake notifier for testing
#[derive(Clone, Default)]
pub struct FakeNotifier {
    calls: Arc<Mutex<Vec<NotifyCall>>>,
    failing: Arc<AtomicBool>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all recorded deliveries
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Delivery {
                channel: channel.to_string(),
                message: "fake failure".to_string(),
            });
        }
        let mut calls = self.calls.lock().unwrap_or_else(|e| e.into_inner());
        for message in chunk_message(text, MESSAGE_LIMIT) {
            calls.push(NotifyCall {
                channel: channel.to_string(),
                message,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
