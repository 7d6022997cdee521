// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for cluster state to converge.
//!
//! Each operation pairs a probe over [`ClusterClient`](crate::kubectl::ClusterClient)
//! with the shared [`poll`](crate::poll::poll) loop.

pub mod crd;
pub mod health;
pub mod pods;

pub use crd::{classify_crd_listing, wait_for_crd};
pub use health::wait_for_ray_health;
pub use pods::{classify_pod_count, classify_pod_phase, wait_for_pod_to_start, wait_for_pods};
