// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the agent runner and chat delivery

pub mod agent;
pub mod notify;
pub mod traced;

pub use agent::{AgentError, AgentRunner, ChunkSender, ChunkStream, CommandAgentRunner};
pub use notify::{
    chunk_message, DiscordWebhookNotifier, NoOpNotifier, Notifier, NotifyError, MESSAGE_LIMIT,
};
pub use traced::{TracedAgentRunner, TracedNotifier};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use agent::FakeAgentRunner;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifier, NotifyCall};
