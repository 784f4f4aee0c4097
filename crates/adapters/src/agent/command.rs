// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent runner backed by a child process

use super::{AgentError, AgentRunner, ChunkSender, ChunkStream};
use async_trait::async_trait;
use hive_core::config::AgentSettings;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};

const CHUNK_BUFFER: usize = 32;

/// Runs `program [args..] <prompt>` and streams stdout line by line
#[derive(Clone, Debug)]
pub struct CommandAgentRunner {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandAgentRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn from_settings(settings: &AgentSettings) -> Self {
        Self {
            program: settings.command.clone(),
            args: settings.args.clone(),
            working_dir: settings.working_dir.clone(),
        }
    }
}

#[async_trait]
impl AgentRunner for CommandAgentRunner {
    async fn stream(&self, prompt: &str) -> Result<ChunkStream, AgentError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| AgentError::Spawn {
            command: self.program.clone(),
            source,
        })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AgentError::Output("stdout not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| AgentError::Output("stderr not captured".to_string()))?;

        let (tx, stream) = ChunkStream::channel(CHUNK_BUFFER);
        tokio::spawn(pump(child, stdout, stderr, tx));
        Ok(stream)
    }
}

/// Forward stdout lines until EOF, then report the exit status. Returning
/// early drops `child`, which kills it.
async fn pump(
    mut child: Child,
    stdout: ChildStdout,
    stderr: ChildStderr,
    tx: ChunkSender,
) {
    let stderr_task = tokio::spawn(async move {
        let mut text = String::new();
        let _ = BufReader::new(stderr).read_to_string(&mut text).await;
        text
    });

    let mut reader = BufReader::new(stdout);
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {
                if tx.send(Ok(line)).await.is_err() {
                    tracing::debug!("agent output dropped by consumer, stopping agent");
                    return;
                }
            }
            Err(e) => {
                let _ = tx.send(Err(AgentError::Output(e.to_string()))).await;
                return;
            }
        }
    }

    match child.wait().await {
        Ok(status) if status.success() => {}
        Ok(status) => {
            let stderr = stderr_task.await.unwrap_or_default();
            let _ = tx
                .send(Err(AgentError::Exited {
                    status: status.to_string(),
                    stderr: stderr.trim().to_string(),
                }))
                .await;
        }
        Err(e) => {
            let _ = tx.send(Err(AgentError::Output(e.to_string()))).await;
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
