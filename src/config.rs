// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{kubectl, poll, ray};
use crate::poll::PollConfig;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Settings loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// kubectl binary to invoke
    pub kubectl: String,
    /// Namespace used when none is given explicitly
    pub namespace: String,
    pub max_attempts: u32,
    pub backoff_secs: u64,
    /// Container the Ray health check runs in
    pub ray_container: String,
    /// Interpreter used to run inline scripts inside pods
    pub script_interpreter: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let string_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            kubectl: string_or("KUBEWAIT_KUBECTL", kubectl::DEFAULT_BINARY),
            namespace: string_or("KUBEWAIT_NAMESPACE", kubectl::DEFAULT_NAMESPACE),
            max_attempts: parse_or(&lookup, "KUBEWAIT_MAX_ATTEMPTS", poll::DEFAULT_MAX_ATTEMPTS)?,
            backoff_secs: parse_or(&lookup, "KUBEWAIT_BACKOFF_SECS", poll::DEFAULT_BACKOFF_SECS)?,
            ray_container: string_or("KUBEWAIT_RAY_CONTAINER", ray::DEFAULT_CONTAINER),
            script_interpreter: string_or(
                "KUBEWAIT_SCRIPT_INTERPRETER",
                ray::DEFAULT_SCRIPT_INTERPRETER,
            ),
        })
    }

    /// Apply per-invocation overrides, e.g. from command line flags
    pub fn with_overrides(
        mut self,
        max_attempts: Option<u32>,
        backoff_secs: Option<u64>,
        namespace: Option<String>,
    ) -> Self {
        if let Some(max_attempts) = max_attempts {
            self.max_attempts = max_attempts;
        }
        if let Some(backoff_secs) = backoff_secs {
            self.backoff_secs = backoff_secs;
        }
        if let Some(namespace) = namespace {
            self.namespace = namespace;
        }
        self
    }

    /// Polling budget for wait operations
    pub fn poll_config(&self) -> Result<PollConfig> {
        PollConfig::new(self.max_attempts, Duration::from_secs(self.backoff_secs))
            .context("max attempts must be at least 1")
    }
}

fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {value}")),
        None => Ok(default),
    }
}
