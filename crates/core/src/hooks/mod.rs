// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent hook events and decisions
//!
//! The agent runner reports tool activity as hook payloads discriminated by
//! `hook_event_name`. Each payload is parsed into a [`ToolEvent`] and passed
//! through a [`HookChain`] of handlers, each returning a [`Decision`].

mod builtin;

pub use builtin::{
    DangerousCommandGuard, PendingWorkReminder, ProgressTracker, ReadOnlyApproval,
    SafeWriteApproval, ToolAuditLog, DEFAULT_BLOCKED_PATTERNS,
};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A tool invocation about to run or just finished
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolUse {
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: Value,
    #[serde(default)]
    pub tool_response: Option<Value>,
    #[serde(default)]
    pub tool_use_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ToolUse {
    /// String field from the tool input, e.g. `file_path` or `command`
    pub fn input_str(&self, key: &str) -> Option<&str> {
        self.tool_input.get(key).and_then(Value::as_str)
    }
}

/// Agent (or subagent) stopping
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StopInfo {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub stop_hook_active: bool,
    #[serde(default)]
    pub tool_use_id: Option<String>,
}

/// Hook payload, discriminated by `hook_event_name`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "hook_event_name")]
pub enum ToolEvent {
    #[serde(rename = "PreToolUse")]
    PreUse(ToolUse),
    #[serde(rename = "PostToolUse")]
    PostUse(ToolUse),
    #[serde(rename = "Stop")]
    Stop(StopInfo),
    #[serde(rename = "SubagentStop")]
    SubagentStop(StopInfo),
}

impl ToolEvent {
    /// Wire name of the event kind
    pub fn name(&self) -> &'static str {
        match self {
            ToolEvent::PreUse(_) => "PreToolUse",
            ToolEvent::PostUse(_) => "PostToolUse",
            ToolEvent::Stop(_) => "Stop",
            ToolEvent::SubagentStop(_) => "SubagentStop",
        }
    }

    pub fn tool_name(&self) -> Option<&str> {
        match self {
            ToolEvent::PreUse(u) | ToolEvent::PostUse(u) => Some(&u.tool_name),
            ToolEvent::Stop(_) | ToolEvent::SubagentStop(_) => None,
        }
    }
}

/// Permission verdict for a pending tool use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Allow,
    Ask,
    Deny,
}

/// Outcome of a handler; `Decision::default()` means "no opinion"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decision {
    pub permission: Option<Permission>,
    pub reason: Option<String>,
    pub system_message: Option<String>,
}

impl Decision {
    pub fn pass() -> Self {
        Self::default()
    }

    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            permission: Some(Permission::Allow),
            reason: Some(reason.into()),
            system_message: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            permission: Some(Permission::Deny),
            reason: Some(reason.into()),
            system_message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.system_message = Some(message.into());
        self
    }

    pub fn is_pass(&self) -> bool {
        self.permission.is_none() && self.system_message.is_none()
    }

    /// Fold another decision into this one. Deny beats ask beats allow;
    /// system messages accumulate in order.
    pub fn merge(self, other: Decision) -> Decision {
        let (permission, reason) = match (self.permission, other.permission) {
            (Some(a), Some(b)) if rank(b) > rank(a) => (Some(b), other.reason),
            (Some(a), _) => (Some(a), self.reason),
            (None, b) => (b, other.reason),
        };
        let system_message = match (self.system_message, other.system_message) {
            (Some(a), Some(b)) => Some(format!("{}\n\n{}", a, b)),
            (a, b) => a.or(b),
        };
        Decision {
            permission,
            reason,
            system_message,
        }
    }

    /// Hook response JSON as the agent runner expects it
    pub fn to_output(&self, event: &ToolEvent) -> Value {
        let mut output = json!({});
        if let Some(permission) = self.permission {
            output["hookSpecificOutput"] = json!({
                "hookEventName": event.name(),
                "permissionDecision": permission,
                "permissionDecisionReason": self.reason.clone().unwrap_or_default(),
            });
        }
        if let Some(message) = &self.system_message {
            output["systemMessage"] = json!(message);
        }
        output
    }
}

fn rank(permission: Permission) -> u8 {
    match permission {
        Permission::Allow => 0,
        Permission::Ask => 1,
        Permission::Deny => 2,
    }
}

/// A hook capability: inspect an event, return a decision
pub trait HookHandler: Send + Sync {
    fn name(&self) -> &str;
    fn handle(&self, event: &ToolEvent) -> Decision;
}

/// Ordered set of handlers whose decisions are merged
#[derive(Default)]
pub struct HookChain {
    handlers: Vec<Box<dyn HookHandler>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handler: impl HookHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(&self, event: &ToolEvent) -> Decision {
        self.handlers
            .iter()
            .map(|h| {
                let decision = h.handle(event);
                if !decision.is_pass() {
                    tracing::debug!(handler = h.name(), event = event.name(), ?decision, "hook decided");
                }
                decision
            })
            .fold(Decision::pass(), Decision::merge)
    }
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
