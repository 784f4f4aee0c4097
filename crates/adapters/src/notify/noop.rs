// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notifier for when delivery is disabled.

use super::{Notifier, NotifyError};
use async_trait::async_trait;

/// Notifier that drops every message.
///
/// Used for dry runs and when no webhooks are configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifier;

impl NoOpNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn send(&self, _channel: &str, _text: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
