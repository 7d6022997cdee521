// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded retry loop shared by every wait operation.
//!
//! A probe performs a single observation and classifies it as a [`PollResult`].
//! All attempt counting and backoff decisions live in [`poll`], probes never retry
//! on their own.

use crate::error::{KubeWaitError, Result};
use std::fmt::Display;
use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Outcome of one probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult<T, S> {
    /// Condition met, stop polling and hand back the value
    Success(T),
    /// Condition not met yet, carries the observed state
    Retry(S),
    /// Condition can never be met
    Fatal(String),
}

/// Attempt budget and backoff for a single polling call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    max_attempts: NonZeroU32,
    backoff: Duration,
}

impl PollConfig {
    pub fn new(max_attempts: u32, backoff: Duration) -> Result<Self> {
        let max_attempts = NonZeroU32::new(max_attempts).ok_or_else(|| {
            KubeWaitError::InvalidPollConfig("max attempts must be at least 1".to_string())
        })?;
        Ok(Self {
            max_attempts,
            backoff,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

/// Why a polling call ended without success
#[derive(Debug)]
pub enum PollError<S> {
    /// Every attempt returned `Retry`
    Exhausted {
        condition: String,
        attempts: u32,
        last: S,
    },
    /// A probe returned `Fatal`
    Permanent {
        condition: String,
        attempt: u32,
        reason: String,
    },
    /// The observation itself failed
    Aborted(KubeWaitError),
}

impl<S: Display> From<PollError<S>> for KubeWaitError {
    fn from(err: PollError<S>) -> Self {
        match err {
            PollError::Exhausted {
                condition,
                attempts,
                last,
            } => KubeWaitError::TimeoutExceeded {
                condition,
                attempts,
                last_state: last.to_string(),
            },
            PollError::Permanent {
                condition, reason, ..
            } => KubeWaitError::PermanentFailure(format!("{condition}: {reason}")),
            PollError::Aborted(e) => e,
        }
    }
}

/// Invoke `probe` until it succeeds, fails permanently or the attempt budget runs out.
///
/// Sleeps for the configured backoff between attempts, never after the last one.
pub async fn poll<T, S, F, Fut>(
    config: &PollConfig,
    condition: impl AsRef<str>,
    mut probe: F,
) -> std::result::Result<T, PollError<S>>
where
    S: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollResult<T, S>>>,
{
    let condition = condition.as_ref();
    let max_attempts = config.max_attempts();
    let mut attempt = 1;

    loop {
        match probe().await.map_err(PollError::Aborted)? {
            PollResult::Success(value) => return Ok(value),
            PollResult::Fatal(reason) => {
                return Err(PollError::Permanent {
                    condition: condition.to_string(),
                    attempt,
                    reason,
                })
            }
            PollResult::Retry(state) if attempt >= max_attempts => {
                return Err(PollError::Exhausted {
                    condition: condition.to_string(),
                    attempts: attempt,
                    last: state,
                })
            }
            PollResult::Retry(state) => {
                info!(
                    "[{attempt}/{max_attempts}] waiting for {condition}: {state}, retrying in {:?}",
                    config.backoff
                );
                sleep(config.backoff).await;
                attempt += 1;
            }
        }
    }
}
