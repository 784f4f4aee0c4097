// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in hook handlers

use super::{Decision, HookHandler, ToolEvent};
use std::path::{Path, PathBuf};

const READ_ONLY_TOOLS: &[&str] = &["Read", "Glob", "Grep", "WebFetch", "WebSearch"];
const WRITE_TOOLS: &[&str] = &["Write", "Edit"];
const AUDIT_TRUNCATE: usize = 200;

/// Shell command fragments that are never allowed to run
pub const DEFAULT_BLOCKED_PATTERNS: &[&str] = &[
    "rm -rf /",
    "rm -rf ~",
    "rm -rf /*",
    "> /dev/sda",
    "mkfs.",
    ":(){:|:&};:",
    "chmod -R 777 /",
    "dd if=/dev/zero of=/dev/sda",
];

/// Approves tools that cannot modify anything
pub struct ReadOnlyApproval;

impl HookHandler for ReadOnlyApproval {
    fn name(&self) -> &str {
        "read-only-approval"
    }

    fn handle(&self, event: &ToolEvent) -> Decision {
        match event {
            ToolEvent::PreUse(tool) if READ_ONLY_TOOLS.contains(&tool.tool_name.as_str()) => {
                Decision::allow("Read-only operation auto-approved")
            }
            _ => Decision::pass(),
        }
    }
}

/// Approves file writes beneath configured directories
pub struct SafeWriteApproval {
    dirs: Vec<PathBuf>,
}

impl SafeWriteApproval {
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }
}

impl HookHandler for SafeWriteApproval {
    fn name(&self) -> &str {
        "safe-write-approval"
    }

    fn handle(&self, event: &ToolEvent) -> Decision {
        let ToolEvent::PreUse(tool) = event else {
            return Decision::pass();
        };
        if !WRITE_TOOLS.contains(&tool.tool_name.as_str()) {
            return Decision::pass();
        }
        let Some(file_path) = tool.input_str("file_path") else {
            return Decision::pass();
        };
        // Component-wise prefix, so /vault-other is not inside /vault
        let path = Path::new(file_path);
        match self.dirs.iter().find(|dir| path.starts_with(dir)) {
            Some(dir) => Decision::allow(format!(
                "Write to safe directory auto-approved: {}",
                dir.display()
            )),
            None => Decision::pass(),
        }
    }
}

/// Denies shell commands containing a blocked pattern
pub struct DangerousCommandGuard {
    patterns: Vec<String>,
}

impl DangerousCommandGuard {
    pub fn new(patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }
}

impl Default for DangerousCommandGuard {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_PATTERNS.iter().map(|p| p.to_string()))
    }
}

impl HookHandler for DangerousCommandGuard {
    fn name(&self) -> &str {
        "dangerous-command-guard"
    }

    fn handle(&self, event: &ToolEvent) -> Decision {
        let ToolEvent::PreUse(tool) = event else {
            return Decision::pass();
        };
        if tool.tool_name != "Bash" {
            return Decision::pass();
        }
        let command = tool.input_str("command").unwrap_or_default();
        match self.patterns.iter().find(|p| command.contains(p.as_str())) {
            Some(pattern) => {
                tracing::warn!(command, pattern = pattern.as_str(), "blocking dangerous command");
                Decision::deny(format!("Dangerous command blocked: contains \"{}\"", pattern))
                    .with_message(
                        "This command has been blocked for safety. Please use a safer alternative.",
                    )
            }
            None => Decision::pass(),
        }
    }
}

/// Logs every tool start and finish
pub struct ToolAuditLog;

impl HookHandler for ToolAuditLog {
    fn name(&self) -> &str {
        "tool-audit-log"
    }

    fn handle(&self, event: &ToolEvent) -> Decision {
        match event {
            ToolEvent::PreUse(tool) => {
                tracing::info!(
                    tool = tool.tool_name.as_str(),
                    input = %truncate(&tool.tool_input.to_string(), AUDIT_TRUNCATE),
                    "tool start"
                );
            }
            ToolEvent::PostUse(tool) => {
                let response = tool
                    .tool_response
                    .as_ref()
                    .map(|r| r.to_string())
                    .unwrap_or_default();
                tracing::info!(
                    tool = tool.tool_name.as_str(),
                    response = %truncate(&response, AUDIT_TRUNCATE),
                    "tool end"
                );
            }
            ToolEvent::Stop(_) | ToolEvent::SubagentStop(_) => {}
        }
        Decision::pass()
    }
}

/// Logs subagent and agent completion
pub struct ProgressTracker;

impl HookHandler for ProgressTracker {
    fn name(&self) -> &str {
        "progress-tracker"
    }

    fn handle(&self, event: &ToolEvent) -> Decision {
        match event {
            ToolEvent::SubagentStop(info) => {
                tracing::info!(
                    tool_use_id = info.tool_use_id.as_deref().unwrap_or("unknown"),
                    "subagent completed"
                );
            }
            ToolEvent::Stop(info) => {
                tracing::info!(
                    session_id = info.session_id.as_deref().unwrap_or("unknown"),
                    stop_hook_active = info.stop_hook_active,
                    "agent stop"
                );
            }
            ToolEvent::PreUse(_) | ToolEvent::PostUse(_) => {}
        }
        Decision::pass()
    }
}

/// On stop, reminds the agent of pending queue work
pub struct PendingWorkReminder {
    pending: Vec<String>,
}

impl PendingWorkReminder {
    pub fn new(pending: impl IntoIterator<Item = String>) -> Self {
        Self {
            pending: pending.into_iter().collect(),
        }
    }
}

impl HookHandler for PendingWorkReminder {
    fn name(&self) -> &str {
        "pending-work-reminder"
    }

    fn handle(&self, event: &ToolEvent) -> Decision {
        let ToolEvent::Stop(info) = event else {
            return Decision::pass();
        };
        // A reminder already fired for this stop; let the agent finish
        if info.stop_hook_active || self.pending.is_empty() {
            return Decision::pass();
        }
        let items = self
            .pending
            .iter()
            .enumerate()
            .map(|(i, desc)| format!("{}. {}", i + 1, desc))
            .collect::<Vec<_>>()
            .join("\n");
        tracing::info!(pending = self.pending.len(), "stop hook found pending work");
        Decision::pass().with_message(format!(
            "AUTONOMOUS MODE: You have pending tasks in the work queue.\n\
             Before fully stopping, please review and address these items:\n\n\
             {}\n\n\
             If you've completed your current task and these items need attention, \
             continue working on them. Otherwise, acknowledge completion.",
            items
        ))
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
