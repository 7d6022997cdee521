// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster observations and commands built on a [`CommandRunner`]

use crate::constants::ray::{DEFAULT_SCRIPT_INTERPRETER, RAYCLUSTER_KIND};
use crate::error::{KubeWaitError, Result};
use crate::kubectl::{CommandRunner, KubectlCommand, ProcessRunner};
use crate::types::raycluster::RayCluster;
use kube::Resource;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Thin wrapper around kubectl used by the wait operations
#[derive(Debug, Clone)]
pub struct ClusterClient<R = ProcessRunner> {
    runner: R,
    script_interpreter: String,
}

impl ClusterClient<ProcessRunner> {
    /// Client that shells out to the given kubectl binary
    pub fn kubectl(binary: impl Into<String>) -> Self {
        Self::new(ProcessRunner::new(binary))
    }
}

impl<R: CommandRunner> ClusterClient<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            script_interpreter: DEFAULT_SCRIPT_INTERPRETER.to_string(),
        }
    }

    /// Interpreter invoked in the pod by [`ClusterClient::exec_script_in_pod`]
    pub fn with_script_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.script_interpreter = interpreter.into();
        self
    }

    /// Raw `kubectl get crd` table
    pub async fn crd_listing(&self) -> Result<String> {
        self.runner.run(&KubectlCommand::GetCrds).await
    }

    /// Names of all pods in the namespace, in the order kubectl reports them
    #[instrument(skip(self))]
    pub async fn pod_names(&self, namespace: &str) -> Result<Vec<String>> {
        let output = self
            .runner
            .run(&KubectlCommand::ListPods { namespace })
            .await?;
        Ok(parse_pod_names(&output))
    }

    /// First pod whose name contains `name_filter`, or `None` when nothing matches
    #[instrument(skip(self))]
    pub async fn find_pod(&self, name_filter: &str, namespace: &str) -> Result<Option<String>> {
        let pod = self
            .pod_names(namespace)
            .await?
            .into_iter()
            .find(|name| name.contains(name_filter));

        if pod.is_none() {
            warn!(
                "No match for `{}` in namespace `{}`",
                name_filter, namespace
            );
        }
        Ok(pod)
    }

    /// Raw `status.phase` output for a pod
    pub async fn pod_phase(&self, pod: &str, namespace: &str) -> Result<String> {
        self.runner
            .run(&KubectlCommand::GetPodPhase { namespace, pod })
            .await
    }

    /// Run `command` inside the pod and return its trimmed stdout
    #[instrument(skip(self, command), fields(command = %command.join(" ")))]
    pub async fn exec_in_pod(
        &self,
        command: &[String],
        pod: &str,
        namespace: &str,
        container: Option<&str>,
    ) -> Result<String> {
        let output = self
            .runner
            .run(&KubectlCommand::Exec {
                pod,
                namespace,
                container,
                command,
            })
            .await?;
        debug!("Output of exec in pod {}:\n{}", pod, output);
        Ok(output)
    }

    /// Read a local script and run it inline through the configured interpreter in the pod
    #[instrument(skip(self, script_path), fields(script = %script_path.display()))]
    pub async fn exec_script_in_pod(
        &self,
        script_path: &Path,
        pod: &str,
        namespace: &str,
        container: Option<&str>,
    ) -> Result<String> {
        let script = tokio::fs::read_to_string(script_path)
            .await
            .map_err(|source| KubeWaitError::ScriptRead {
                path: script_path.to_path_buf(),
                source,
            })?;

        let command = [self.script_interpreter.clone(), "-c".to_string(), script];
        self.exec_in_pod(&command, pod, namespace, container).await
    }

    /// Fetch an object as a generic YAML document
    #[instrument(skip(self))]
    pub async fn get_custom_resource(
        &self,
        kind: &str,
        name: &str,
        namespace: &str,
    ) -> Result<serde_yaml::Value> {
        let output = self
            .runner
            .run(&KubectlCommand::GetResource {
                kind,
                name,
                namespace,
            })
            .await?;
        Ok(serde_yaml::from_str(&output)?)
    }

    /// Fetch a RayCluster as a generic YAML document
    pub async fn get_raycluster(&self, name: &str, namespace: &str) -> Result<serde_yaml::Value> {
        self.get_custom_resource(RAYCLUSTER_KIND, name, namespace)
            .await
    }

    /// Fetch an object and deserialize it into its typed representation
    pub async fn get_resource<K>(&self, name: &str, namespace: &str) -> Result<K>
    where
        K: Resource<DynamicType = ()> + DeserializeOwned,
    {
        let kind = qualified_kind::<K>();
        let output = self
            .runner
            .run(&KubectlCommand::GetResource {
                kind: &kind,
                name,
                namespace,
            })
            .await?;
        Ok(serde_yaml::from_str(&output)?)
    }

    pub async fn get_raycluster_object(&self, name: &str, namespace: &str) -> Result<RayCluster> {
        self.get_resource::<RayCluster>(name, namespace).await
    }
}

/// Resource name kubectl resolves unambiguously, e.g. `rayclusters.ray.io`
pub fn qualified_kind<K: Resource<DynamicType = ()>>() -> String {
    let plural = K::plural(&());
    let group = K::group(&());
    if group.is_empty() {
        plural.into_owned()
    } else {
        format!("{plural}.{group}")
    }
}

/// Split a custom-columns pod listing into names. Empty output means no pods.
pub fn parse_pod_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
