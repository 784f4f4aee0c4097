// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discord delivery through channel webhooks

use super::{chunk_message, Notifier, NotifyError, MESSAGE_LIMIT};
use async_trait::async_trait;
use hive_core::config::NotifySettings;
use std::sync::Arc;

/// Posts to Discord channels, one webhook per channel.
///
/// Channel names pass through the alias table first, so routines written
/// against legacy channel names still land somewhere.
#[derive(Clone)]
pub struct DiscordWebhookNotifier {
    settings: Arc<NotifySettings>,
}

impl DiscordWebhookNotifier {
    pub fn new(settings: NotifySettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }

    fn webhook_for(&self, channel: &str) -> Result<(String, String), NotifyError> {
        let resolved = self.settings.resolve_channel(channel);
        self.settings
            .webhooks
            .get(resolved)
            .map(|url| (resolved.to_string(), url.clone()))
            .ok_or_else(|| NotifyError::UnknownChannel(resolved.to_string()))
    }
}

#[async_trait]
impl Notifier for DiscordWebhookNotifier {
    async fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        let (channel, url) = self.webhook_for(channel)?;
        let chunks = chunk_message(text, MESSAGE_LIMIT);
        let count = chunks.len();

        // Sequential, so chunks arrive in order
        for chunk in chunks {
            let body = serde_json::json!({ "content": chunk }).to_string();
            let url = url.clone();
            tokio::task::spawn_blocking(move || {
                ureq::post(url.as_str())
                    .header("Content-Type", "application/json")
                    .send(body)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r)
            .map_err(|message| NotifyError::Delivery {
                channel: channel.clone(),
                message,
            })?;
        }

        tracing::info!(channel = channel.as_str(), chunks = count, "posted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "discord_tests.rs"]
mod tests;
