// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for Ray to pass its health check inside a pod

use crate::constants::ray::HEALTH_CHECK_COMMAND;
use crate::error::{KubeWaitError, Result};
use crate::kubectl::{ClusterClient, CommandRunner};
use crate::poll::{poll, PollConfig, PollError, PollResult};
use tracing::info;

/// Wait until a pod whose name contains `pod_name_filter` passes `ray health-check`
/// in `container`, which means Ray has completely started in the pod.
///
/// Unlike the other waits, running out of attempts returns the last underlying
/// error (usually the failed exec) instead of a generic timeout.
pub async fn wait_for_ray_health<R: CommandRunner>(
    client: &ClusterClient<R>,
    pod_name_filter: &str,
    namespace: &str,
    container: &str,
    config: &PollConfig,
) -> Result<String> {
    let command: Vec<String> = HEALTH_CHECK_COMMAND.iter().map(|s| s.to_string()).collect();
    let command = command.as_slice();

    let result = poll(
        config,
        format!("ray health check in pod matching `{pod_name_filter}`"),
        move || probe_ray_health(client, command, pod_name_filter, namespace, container),
    )
    .await;

    match result {
        Ok(pod) => {
            info!("ray health check passes for pod {}", pod);
            Ok(pod)
        }
        Err(PollError::Exhausted { last, .. }) => {
            info!("Giving up on ray health check for `{}`", pod_name_filter);
            Err(last)
        }
        Err(e) => Err(e.into()),
    }
}

async fn probe_ray_health<R: CommandRunner>(
    client: &ClusterClient<R>,
    command: &[String],
    pod_name_filter: &str,
    namespace: &str,
    container: &str,
) -> Result<PollResult<String, KubeWaitError>> {
    let Some(pod) = client.find_pod(pod_name_filter, namespace).await? else {
        return Ok(PollResult::Retry(KubeWaitError::PodNotFound {
            filter: pod_name_filter.to_string(),
            namespace: namespace.to_string(),
        }));
    };

    // `ray health-check` exits zero iff it succeeds
    match client
        .exec_in_pod(command, &pod, namespace, Some(container))
        .await
    {
        Ok(_) => Ok(PollResult::Success(pod)),
        Err(e) if e.is_execution_failure() => {
            info!("Failed ray health check for pod {}", pod);
            Ok(PollResult::Retry(e))
        }
        Err(e) => Err(e),
    }
}
