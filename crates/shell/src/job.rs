// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job body `ShellScheduler` runs: template substitution then a
//! subprocess spawn through `/bin/sh -c` (spec §4.2).

use async_trait::async_trait;
use fsw_core::{Event, OperationError, TaskId};
use fsw_engine::Job;
use thiserror::Error;
use tracing::error;

use crate::quote::shell_quote;

/// Recoverable shell-job failures (spec §7 OperationError, specialized).
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to spawn shell command: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to wait for shell command: {0}")]
    Wait(#[source] std::io::Error),
    #[error("shell command exited with {0}")]
    NonZeroExit(std::process::ExitStatus),
}

impl From<ShellError> for OperationError {
    fn from(e: ShellError) -> Self {
        OperationError::msg(e.to_string())
    }
}

/// Spawns `cmd` through `/bin/sh -c`, substituting `{maskname}`,
/// `{pathname}`, and `{src_pathname}` with the shell-quoted event fields.
pub struct ShellJob {
    cmd: String,
}

impl ShellJob {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self { cmd: cmd.into() }
    }

    /// Apply the three placeholder substitutions (spec §4.2, §6). Each
    /// value is POSIX-quoted before splicing in, so the result is a single
    /// well-formed `/bin/sh -c` argument regardless of path contents.
    fn render(&self, event: &Event) -> String {
        let src = event.src_pathname.as_deref().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        self.cmd
            .replace("{maskname}", &shell_quote(event.primary_flag()))
            .replace("{pathname}", &shell_quote(&event.pathname.to_string_lossy()))
            .replace("{src_pathname}", &shell_quote(&src))
    }
}

#[async_trait]
impl Job for ShellJob {
    async fn run(&self, event: &Event, task_id: &TaskId) -> Result<(), OperationError> {
        let rendered = self.render(event);

        let mut child = tokio::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(&rendered)
            .spawn()
            .map_err(|e| {
                error!(%task_id, command = %rendered, error = %e, "failed to spawn shell command");
                ShellError::Spawn(e)
            })?;

        let status = child.wait().await.map_err(|e| {
            error!(%task_id, command = %rendered, error = %e, "failed to wait for shell command");
            ShellError::Wait(e)
        })?;

        if !status.success() {
            error!(%task_id, command = %rendered, %status, "shell command exited non-zero");
            return Err(ShellError::NonZeroExit(status).into());
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
