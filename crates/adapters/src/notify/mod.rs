// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat delivery adapters

mod discord;
mod noop;

pub use discord::DiscordWebhookNotifier;
pub use noop::NoOpNotifier;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotifier, NotifyCall};

use async_trait::async_trait;
use thiserror::Error;

/// Longest message the chat platform accepts, in characters
pub const MESSAGE_LIMIT: usize = 2000;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no webhook configured for channel: {0}")]
    UnknownChannel(String),
    #[error("delivery to {channel} failed: {message}")]
    Delivery { channel: String, message: String },
}

/// Adapter that posts text to a named channel
#[async_trait]
pub trait Notifier: Clone + Send + Sync + 'static {
    /// Deliver `text`, split into as many ordered messages as needed
    async fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError>;
}

/// Split `text` into pieces of at most `limit` characters, preserving order.
/// Empty text yields no pieces.
pub fn chunk_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit)
        .map(|piece| piece.iter().collect())
        .collect()
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
