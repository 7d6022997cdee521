// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting on pod count and pod phase

use crate::constants::kubectl::NOT_FOUND;
use crate::constants::pod::PHASE_RUNNING;
use crate::error::{KubeWaitError, Result};
use crate::kubectl::{ClusterClient, CommandRunner};
use crate::poll::{poll, PollConfig, PollResult};
use tracing::info;

/// `Success` when exactly `goal` pods exist, otherwise retry with the current count
pub fn classify_pod_count(count: usize, goal: usize) -> PollResult<(), usize> {
    if count == goal {
        PollResult::Success(())
    } else {
        PollResult::Retry(count)
    }
}

/// Classify the `status.phase` output for `pod`.
///
/// Output mentioning "not found" is terminal, "Running" is success, any other phase is retried.
pub fn classify_pod_phase(pod: &str, phase: &str) -> PollResult<(), String> {
    if phase.contains(NOT_FOUND) {
        PollResult::Fatal(format!("Pod {pod} not found"))
    } else if phase == PHASE_RUNNING {
        PollResult::Success(())
    } else {
        PollResult::Retry(format!("pod {pod} has status {phase}"))
    }
}

/// Wait for the number of pods in `namespace` to be exactly `goal`
pub async fn wait_for_pods<R: CommandRunner>(
    client: &ClusterClient<R>,
    goal: usize,
    namespace: &str,
    config: &PollConfig,
) -> Result<()> {
    poll(
        config,
        format!("{goal} pod(s) in namespace {namespace}"),
        move || probe_pod_count(client, goal, namespace),
    )
    .await?;

    info!("Confirmed {} pod(s) in namespace {}", goal, namespace);
    Ok(())
}

/// Wait until a pod whose name contains `pod_name_filter` has the Running phase.
///
/// Returns the name of the pod that started.
pub async fn wait_for_pod_to_start<R: CommandRunner>(
    client: &ClusterClient<R>,
    pod_name_filter: &str,
    namespace: &str,
    config: &PollConfig,
) -> Result<String> {
    let pod = poll(
        config,
        format!("pod matching `{pod_name_filter}` to enter Running status"),
        move || probe_pod_phase(client, pod_name_filter, namespace),
    )
    .await?;

    info!("Confirmed pod {} is Running", pod);
    Ok(pod)
}

async fn probe_pod_count<R: CommandRunner>(
    client: &ClusterClient<R>,
    goal: usize,
    namespace: &str,
) -> Result<PollResult<(), usize>> {
    let count = client.pod_names(namespace).await?.len();
    Ok(classify_pod_count(count, goal))
}

async fn probe_pod_phase<R: CommandRunner>(
    client: &ClusterClient<R>,
    pod_name_filter: &str,
    namespace: &str,
) -> Result<PollResult<String, String>> {
    let Some(pod) = client.find_pod(pod_name_filter, namespace).await? else {
        return Ok(PollResult::Retry(format!(
            "no pod matching `{pod_name_filter}` yet"
        )));
    };

    // kubectl exits non-zero and reports "not found" on stderr when the pod vanished
    let phase = match client.pod_phase(&pod, namespace).await {
        Ok(phase) => phase,
        Err(KubeWaitError::ExecutionFailed { stderr, .. }) if stderr.contains(NOT_FOUND) => stderr,
        Err(e) => return Err(e),
    };

    Ok(match classify_pod_phase(&pod, &phase) {
        PollResult::Success(()) => PollResult::Success(pod),
        PollResult::Retry(state) => PollResult::Retry(state),
        PollResult::Fatal(reason) => PollResult::Fatal(reason),
    })
}
