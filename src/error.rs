// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubeWaitError {
    #[error("Timed out after {attempts} attempt(s) waiting for {condition}; last observed: {last_state}")]
    TimeoutExceeded {
        condition: String,
        attempts: u32,
        last_state: String,
    },

    #[error("Gave up waiting: {0}")]
    PermanentFailure(String),

    #[error(
        "Command `{command}` failed with exit code {}: {stderr}",
        .code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
    )]
    ExecutionFailed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read script {}: {source}", .path.display())]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse resource document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No pod matching `{filter}` in namespace `{namespace}`")]
    PodNotFound { filter: String, namespace: String },

    #[error("Invalid poll configuration: {0}")]
    InvalidPollConfig(String),
}

impl KubeWaitError {
    /// True when the error comes from a command that ran and exited non-zero.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, Self::ExecutionFailed { .. })
    }
}

pub type Result<T> = std::result::Result<T, KubeWaitError>;
