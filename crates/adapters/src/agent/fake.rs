// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake agent runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AgentError, AgentRunner, ChunkStream};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted agent: replies are consumed in order, then the default reply
/// repeats. Every prompt is recorded.
#[derive(Clone)]
pub struct FakeAgentRunner {
    inner: Arc<Mutex<FakeInner>>,
}

struct FakeInner {
    replies: VecDeque<Result<String, String>>,
    default: Result<String, String>,
    calls: Vec<String>,
}

impl Default for FakeAgentRunner {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeInner {
                replies: VecDeque::new(),
                default: Ok("ok".to_string()),
                calls: Vec::new(),
            })),
        }
    }
}

impl FakeAgentRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent that fails every call with `message`
    pub fn failing(message: &str) -> Self {
        let fake = Self::new();
        fake.set_default(Err(message.to_string()));
        fake
    }

    pub fn push_reply(&self, text: &str) {
        self.lock().replies.push_back(Ok(text.to_string()));
    }

    pub fn push_error(&self, message: &str) {
        self.lock().replies.push_back(Err(message.to_string()));
    }

    pub fn set_default(&self, reply: Result<String, String>) {
        self.lock().default = reply;
    }

    /// Prompts received, in order
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AgentRunner for FakeAgentRunner {
    async fn stream(&self, prompt: &str) -> Result<ChunkStream, AgentError> {
        let reply = {
            let mut inner = self.lock();
            inner.calls.push(prompt.to_string());
            let next = inner.replies.pop_front();
            next.unwrap_or_else(|| inner.default.clone())
        };
        match reply {
            Ok(text) => Ok(ChunkStream::from_chunks(
                text.split_inclusive('\n').map(|l| Ok(l.to_string())).collect(),
            )),
            Err(message) => Err(AgentError::Failed(message)),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
