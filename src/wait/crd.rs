// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for a CRD to be registered

use crate::error::Result;
use crate::kubectl::{ClusterClient, CommandRunner};
use crate::poll::{poll, PollConfig, PollResult};
use tracing::info;

/// `Success` when `crd_name` appears as a whole token in the `kubectl get crd` table
pub fn classify_crd_listing(listing: &str, crd_name: &str) -> PollResult<(), String> {
    if listing.split_whitespace().any(|token| token == crd_name) {
        PollResult::Success(())
    } else {
        PollResult::Retry(listing.to_string())
    }
}

/// Wait until the CRD with the given name is registered.
/// CRD creation can take a moment after the client request returns.
pub async fn wait_for_crd<R: CommandRunner>(
    client: &ClusterClient<R>,
    crd_name: &str,
    config: &PollConfig,
) -> Result<()> {
    poll(config, format!("CRD {crd_name} to be registered"), move || {
        probe_crd(client, crd_name)
    })
    .await?;

    info!("Confirmed existence of CRD {}", crd_name);
    Ok(())
}

async fn probe_crd<R: CommandRunner>(
    client: &ClusterClient<R>,
    crd_name: &str,
) -> Result<PollResult<(), String>> {
    let listing = client.crd_listing().await?;
    Ok(classify_crd_listing(&listing, crd_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KubeWaitError;
    use crate::kubectl::KubectlCommand;
    use crate::test_utils::{crd_listing, MockRunner};
    use std::time::Duration;

    const CRD: &str = "rayclusters.ray.io";

    fn config(max_attempts: u32) -> PollConfig {
        PollConfig::new(max_attempts, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_classify_present() {
        let listing = crd_listing(&["rayjobs.ray.io", CRD]);
        assert_eq!(classify_crd_listing(&listing, CRD), PollResult::Success(()));
    }

    #[test]
    fn test_classify_requires_whole_token() {
        let listing = crd_listing(&["rayclusters.ray.io.example.com"]);
        assert!(matches!(
            classify_crd_listing(&listing, CRD),
            PollResult::Retry(_)
        ));
    }

    #[test]
    fn test_classify_empty_listing() {
        assert_eq!(
            classify_crd_listing("", CRD),
            PollResult::Retry(String::new())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_crd_after_registration() {
        let runner = MockRunner::new()
            .on(KubectlCommand::GetCrds, &crd_listing(&[]))
            .on(KubectlCommand::GetCrds, &crd_listing(&[CRD]));
        let client = ClusterClient::new(runner.clone());

        wait_for_crd(&client, CRD, &config(60)).await.unwrap();
        assert_eq!(runner.call_count(&KubectlCommand::GetCrds), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_crd_times_out() {
        let runner = MockRunner::new().on(KubectlCommand::GetCrds, &crd_listing(&["other.io"]));
        let client = ClusterClient::new(runner.clone());

        let err = wait_for_crd(&client, CRD, &config(3)).await.unwrap_err();
        assert!(matches!(
            err,
            KubeWaitError::TimeoutExceeded { attempts: 3, .. }
        ));
        assert_eq!(runner.call_count(&KubectlCommand::GetCrds), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_crd_kubectl_failure_aborts() {
        let runner = MockRunner::new().on_fail(KubectlCommand::GetCrds, 1, "connection refused");
        let client = ClusterClient::new(runner.clone());

        let err = wait_for_crd(&client, CRD, &config(10)).await.unwrap_err();
        assert!(err.is_execution_failure());
        assert_eq!(runner.call_count(&KubectlCommand::GetCrds), 1);
    }
}
