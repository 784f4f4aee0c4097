// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::agent::FakeAgentRunner;
use crate::notify::FakeNotifier;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_invoke_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedAgentRunner::new(FakeAgentRunner::new());
        traced.invoke("summarize inbox").await
    });

    assert_eq!(result.unwrap(), "ok");
    assert!(logs.contains("agent.invoke"), "Should log span name. Logs:\n{}", logs);
    assert!(logs.contains("starting"), "Should log entry. Logs:\n{}", logs);
    assert!(logs.contains("agent finished"), "Should log completion. Logs:\n{}", logs);
    assert!(logs.contains("elapsed_ms"), "Should log timing. Logs:\n{}", logs);
}

#[test]
fn traced_invoke_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedAgentRunner::new(FakeAgentRunner::failing("quota exceeded"));
        traced.invoke("x").await
    });

    assert!(result.is_err());
    assert!(logs.contains("agent failed"), "Should log failure. Logs:\n{}", logs);
    assert!(logs.contains("quota exceeded"), "Should log error. Logs:\n{}", logs);
}

#[test]
fn traced_notify_logs_delivery() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedNotifier::new(FakeNotifier::new());
        traced.send("general", "hello").await
    });

    assert!(result.is_ok());
    assert!(logs.contains("notify.send"), "Should log span name. Logs:\n{}", logs);
    assert!(logs.contains("general"), "Should log channel. Logs:\n{}", logs);
    assert!(logs.contains("delivered"), "Should log completion. Logs:\n{}", logs);
}

#[test]
fn traced_notify_logs_failure_as_warning() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeNotifier::new();
        fake.set_failing(true);
        TracedNotifier::new(fake).send("general", "hello").await
    });

    assert!(result.is_err());
    assert!(logs.contains("WARN"), "Should warn. Logs:\n{}", logs);
    assert!(logs.contains("delivery failed"), "Logs:\n{}", logs);
}

// =============================================================================
// Delegation tests - verify traced wrapper delegates to inner adapter
// =============================================================================

#[tokio::test]
async fn traced_agent_delegates_to_inner() {
    let fake = FakeAgentRunner::new();
    fake.push_reply("line one\nline two\n");
    let traced = TracedAgentRunner::new(fake.clone());

    let text = traced.stream("prompt").await.unwrap().collect().await.unwrap();
    assert_eq!(text, "line one\nline two\n");
    assert_eq!(fake.calls(), vec!["prompt"]);
}

#[tokio::test]
async fn traced_notifier_delegates_to_inner() {
    let fake = FakeNotifier::new();
    let traced = TracedNotifier::new(fake.clone());

    traced.send("general", "hi").await.unwrap();

    let calls = fake.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].channel, "general");
    assert_eq!(calls[0].message, "hi");
}
