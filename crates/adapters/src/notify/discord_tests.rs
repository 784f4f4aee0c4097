// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::BTreeMap;

fn notifier() -> DiscordWebhookNotifier {
    let mut webhooks = BTreeMap::new();
    webhooks.insert(
        "general".to_string(),
        "http://127.0.0.1:9/webhook".to_string(),
    );
    let mut aliases = BTreeMap::new();
    aliases.insert("team-jpa".to_string(), "general".to_string());
    DiscordWebhookNotifier::new(NotifySettings { webhooks, aliases })
}

#[test]
fn aliases_resolve_to_configured_webhook() {
    let (channel, url) = notifier().webhook_for("team-jpa").unwrap();
    assert_eq!(channel, "general");
    assert_eq!(url, "http://127.0.0.1:9/webhook");
}

#[tokio::test]
async fn unknown_channel_is_an_error() {
    let err = notifier().send("ops", "hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::UnknownChannel(ref c) if c == "ops"));
}

#[tokio::test]
async fn unreachable_webhook_reports_delivery_failure() {
    // Port 9 (discard) is closed on test hosts
    let err = notifier().send("general", "hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::Delivery { ref channel, .. } if channel == "general"));
}
