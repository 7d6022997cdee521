// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! kubectl command rendering, execution, and the cluster client built on top.

pub mod client;
pub mod command;
pub mod runner;

pub use client::{parse_pod_names, ClusterClient};
pub use command::KubectlCommand;
pub use runner::{CommandRunner, ProcessRunner};
