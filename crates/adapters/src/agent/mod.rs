// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent runner: turns a prompt into text
//!
//! Output arrives as an ordered, finite stream of chunks. Consumers either
//! forward chunks as they come or call [`AgentRunner::invoke`] to collect
//! the whole response. Dropping a [`ChunkStream`] before it ends cancels
//! the producer.

mod command;

pub use command::CommandAgentRunner;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAgentRunner;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from running the agent
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("agent exited with {status}: {stderr}")]
    Exited { status: String, stderr: String },
    #[error("failed to read agent output: {0}")]
    Output(String),
    #[error("{0}")]
    Failed(String),
}

pub type ChunkSender = mpsc::Sender<Result<String, AgentError>>;

/// Ordered chunks of one agent response
pub struct ChunkStream {
    rx: mpsc::Receiver<Result<String, AgentError>>,
}

impl ChunkStream {
    /// Bounded channel; the producer waits when the consumer falls behind
    pub fn channel(capacity: usize) -> (ChunkSender, ChunkStream) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, ChunkStream { rx })
    }

    /// Stream over already-known chunks
    pub fn from_chunks(chunks: Vec<Result<String, AgentError>>) -> ChunkStream {
        let (tx, stream) = Self::channel(chunks.len());
        for chunk in chunks {
            // Capacity covers every chunk, so this never waits
            let _ = tx.try_send(chunk);
        }
        stream
    }

    pub async fn next(&mut self) -> Option<Result<String, AgentError>> {
        self.rx.recv().await
    }

    /// Concatenate every chunk; the first error aborts collection
    pub async fn collect(mut self) -> Result<String, AgentError> {
        let mut text = String::new();
        while let Some(chunk) = self.next().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }
}

/// Adapter for the agent that executes prompts
#[async_trait]
pub trait AgentRunner: Clone + Send + Sync + 'static {
    /// Start the agent on `prompt` and stream its response
    async fn stream(&self, prompt: &str) -> Result<ChunkStream, AgentError>;

    /// Run to completion; the response with surrounding whitespace trimmed
    async fn invoke(&self, prompt: &str) -> Result<String, AgentError> {
        let text = self.stream(prompt).await?.collect().await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
