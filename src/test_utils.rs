// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for scripting kubectl responses.

use crate::error::{KubeWaitError, Result};
use crate::kubectl::{ClusterClient, CommandRunner, KubectlCommand};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
enum MockResponse {
    Stdout(String),
    Failure { code: i32, stderr: String },
}

/// A mock kubectl that answers with predefined responses keyed by the rendered arguments.
///
/// Responses registered for the same command are returned in order, the last one repeats.
#[derive(Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response for the command
    pub fn on(self, command: KubectlCommand<'_>, stdout: &str) -> Self {
        self.push(command, MockResponse::Stdout(stdout.to_string()))
    }

    /// Queue a non-zero exit for the command
    pub fn on_fail(self, command: KubectlCommand<'_>, code: i32, stderr: &str) -> Self {
        self.push(
            command,
            MockResponse::Failure {
                code,
                stderr: stderr.to_string(),
            },
        )
    }

    /// Build a cluster client backed by this mock
    pub fn into_client(self) -> ClusterClient<Self> {
        ClusterClient::new(self)
    }

    /// Number of times the command was run
    pub fn call_count(&self, command: &KubectlCommand<'_>) -> usize {
        let key = command.to_string();
        self.calls.lock().unwrap().iter().filter(|c| **c == key).count()
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, command: KubectlCommand<'_>, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(response);
        self
    }

    fn next_response(&self, key: &str) -> Option<MockResponse> {
        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl CommandRunner for MockRunner {
    async fn run(&self, command: &KubectlCommand<'_>) -> Result<String> {
        let key = command.to_string();
        self.calls.lock().unwrap().push(key.clone());

        match self.next_response(&key) {
            Some(MockResponse::Stdout(stdout)) => Ok(stdout.trim().to_string()),
            Some(MockResponse::Failure { code, stderr }) => Err(KubeWaitError::ExecutionFailed {
                command: format!("kubectl {key}"),
                code: Some(code),
                stdout: String::new(),
                stderr,
            }),
            None => Err(KubeWaitError::ExecutionFailed {
                command: format!("kubectl {key}"),
                code: Some(1),
                stdout: String::new(),
                stderr: format!("error: unexpected command `{key}`"),
            }),
        }
    }
}

/// Render a pod listing the way kubectl does with custom columns
pub fn pod_listing(names: &[&str]) -> String {
    let mut out = names.join("\n");
    out.push('\n');
    out
}

/// A `kubectl get crd` table containing the given names
pub fn crd_listing(names: &[&str]) -> String {
    let mut out = String::from("NAME                          CREATED AT\n");
    for name in names {
        out.push_str(&format!("{name}   2026-01-01T00:00:00Z\n"));
    }
    out
}
