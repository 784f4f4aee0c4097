// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::agent::{AgentError, AgentRunner, ChunkStream};
use crate::notify::{Notifier, NotifyError};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any AgentRunner
#[derive(Clone)]
pub struct TracedAgentRunner<A> {
    inner: A,
}

impl<A> TracedAgentRunner<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: AgentRunner> AgentRunner for TracedAgentRunner<A> {
    async fn stream(&self, prompt: &str) -> Result<ChunkStream, AgentError> {
        let span = tracing::info_span!("agent.stream", prompt_len = prompt.len());
        async {
            let result = self.inner.stream(prompt).await;
            match &result {
                Ok(_) => tracing::debug!("streaming"),
                Err(e) => tracing::error!(error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn invoke(&self, prompt: &str) -> Result<String, AgentError> {
        let span = tracing::info_span!("agent.invoke", prompt_len = prompt.len());
        async {
            tracing::info!("starting");

            let start = std::time::Instant::now();
            let result = self.inner.invoke(prompt).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(text) => tracing::info!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    response_len = text.len(),
                    "agent finished"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "agent failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any Notifier
#[derive(Clone)]
pub struct TracedNotifier<N> {
    inner: N,
}

impl<N> TracedNotifier<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<N: Notifier> Notifier for TracedNotifier<N> {
    async fn send(&self, channel: &str, text: &str) -> Result<(), NotifyError> {
        let span = tracing::info_span!("notify.send", channel, text_len = text.len());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.send(channel, text).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "delivered"),
                // Delivery failures never abort a routine
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "delivery failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
