// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed kubectl invocations

use std::fmt;

/// One kubectl invocation. [`KubectlCommand::args`] renders the argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubectlCommand<'a> {
    /// Table of registered custom resource definitions
    GetCrds,
    /// Pod names in a namespace, one per line
    ListPods { namespace: &'a str },
    /// `status.phase` of a single pod
    GetPodPhase { namespace: &'a str, pod: &'a str },
    /// Run a command inside a pod, optionally in a specific container
    Exec {
        pod: &'a str,
        namespace: &'a str,
        container: Option<&'a str>,
        command: &'a [String],
    },
    /// A single object rendered as YAML
    GetResource {
        kind: &'a str,
        name: &'a str,
        namespace: &'a str,
    },
}

impl KubectlCommand<'_> {
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::GetCrds => vec!["get".into(), "crd".into()],
            Self::ListPods { namespace } => vec![
                "-n".into(),
                namespace.to_string(),
                "get".into(),
                "pods".into(),
                "-o".into(),
                "custom-columns=POD:metadata.name".into(),
                "--no-headers".into(),
            ],
            Self::GetPodPhase { namespace, pod } => vec![
                "-n".into(),
                namespace.to_string(),
                "get".into(),
                "pod".into(),
                pod.to_string(),
                "-o".into(),
                "custom-columns=POD:status.phase".into(),
                "--no-headers".into(),
            ],
            Self::Exec {
                pod,
                namespace,
                container,
                command,
            } => {
                let mut args = vec![
                    "-n".into(),
                    namespace.to_string(),
                    "exec".into(),
                    "-it".into(),
                    pod.to_string(),
                ];
                if let Some(container) = container {
                    args.push("-c".into());
                    args.push(container.to_string());
                }
                args.push("--".into());
                args.extend(command.iter().cloned());
                args
            }
            Self::GetResource {
                kind,
                name,
                namespace,
            } => vec![
                "-n".into(),
                namespace.to_string(),
                "get".into(),
                kind.to_string(),
                name.to_string(),
                "-o".into(),
                "yaml".into(),
            ],
        }
    }
}

impl fmt::Display for KubectlCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_crds_args() {
        assert_eq!(KubectlCommand::GetCrds.args(), vec!["get", "crd"]);
    }

    #[test]
    fn test_list_pods_args() {
        let cmd = KubectlCommand::ListPods { namespace: "ray" };
        assert_eq!(
            cmd.to_string(),
            "-n ray get pods -o custom-columns=POD:metadata.name --no-headers"
        );
    }

    #[test]
    fn test_pod_phase_args() {
        let cmd = KubectlCommand::GetPodPhase {
            namespace: "default",
            pod: "head-abc",
        };
        assert_eq!(
            cmd.to_string(),
            "-n default get pod head-abc -o custom-columns=POD:status.phase --no-headers"
        );
    }

    #[test]
    fn test_exec_args_with_container() {
        let command = vec!["ray".to_string(), "health-check".to_string()];
        let cmd = KubectlCommand::Exec {
            pod: "head-abc",
            namespace: "default",
            container: Some("ray-head"),
            command: &command,
        };
        assert_eq!(
            cmd.args(),
            vec![
                "-n",
                "default",
                "exec",
                "-it",
                "head-abc",
                "-c",
                "ray-head",
                "--",
                "ray",
                "health-check"
            ]
        );
    }

    #[test]
    fn test_exec_args_without_container() {
        let command = vec!["ls".to_string()];
        let cmd = KubectlCommand::Exec {
            pod: "worker-xyz",
            namespace: "default",
            container: None,
            command: &command,
        };
        assert_eq!(cmd.to_string(), "-n default exec -it worker-xyz -- ls");
    }

    #[test]
    fn test_get_resource_args() {
        let cmd = KubectlCommand::GetResource {
            kind: "raycluster",
            name: "raycluster-complete",
            namespace: "default",
        };
        assert_eq!(
            cmd.to_string(),
            "-n default get raycluster raycluster-complete -o yaml"
        );
    }
}
