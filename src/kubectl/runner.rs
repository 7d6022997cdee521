// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Running kubectl as a subprocess

use crate::constants::kubectl::DEFAULT_BINARY;
use crate::error::{KubeWaitError, Result};
use crate::kubectl::KubectlCommand;
use std::future::Future;
use tokio::process::Command;
use tracing::debug;

/// Something that can execute a [`KubectlCommand`] and capture its output.
///
/// Implementations return trimmed stdout on success and
/// [`KubeWaitError::ExecutionFailed`] when the command exits non-zero.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &KubectlCommand<'_>) -> impl Future<Output = Result<String>> + Send;
}

/// Runs commands through a local kubectl binary
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    binary: String,
}

impl ProcessRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &KubectlCommand<'_>) -> Result<String> {
        let rendered = format!("{} {}", self.binary, command);
        debug!("Running {}", rendered);

        let output = Command::new(&self.binary)
            .args(command.args())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| KubeWaitError::Spawn {
                command: rendered.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(KubeWaitError::ExecutionFailed {
                command: rendered,
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(stdout)
    }
}
