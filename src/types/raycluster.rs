// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The subset of the KubeRay RayCluster resource the e2e checks look at.
/// Pod templates are not modelled and are ignored when deserializing.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "ray.io", version = "v1alpha1", kind = "RayCluster")]
#[kube(namespaced)]
#[kube(status = "RayClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct RayClusterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ray_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_in_tree_autoscaling: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_group_spec: Option<HeadGroupSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_group_specs: Vec<WorkerGroupSpec>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HeadGroupSpec {
    #[serde(default)]
    pub ray_start_params: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkerGroupSpec {
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_replicas: Option<i32>,
    #[serde(default)]
    pub ray_start_params: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RayClusterStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_worker_replicas: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_worker_replicas: Option<i32>,
}

impl RayCluster {
    /// Look up a worker group by name
    pub fn worker_group(&self, group_name: &str) -> Option<&WorkerGroupSpec> {
        self.spec
            .worker_group_specs
            .iter()
            .find(|g| g.group_name == group_name)
    }

    /// Sum of requested replicas over all worker groups
    pub fn desired_worker_replicas(&self) -> i32 {
        self.spec
            .worker_group_specs
            .iter()
            .filter_map(|g| g.replicas)
            .sum()
    }

    /// True once the operator reports the cluster as ready
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.state.as_deref())
            .is_some_and(|state| state.eq_ignore_ascii_case("ready"))
    }
}
