// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Polling defaults applied by callers when nothing else is configured
pub mod poll {
    /// Number of probe invocations before giving up
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;
    /// Seconds to sleep between unsuccessful probe invocations
    pub const DEFAULT_BACKOFF_SECS: u64 = 5;
}

/// kubectl invocation details
pub mod kubectl {
    pub const DEFAULT_BINARY: &str = "kubectl";
    pub const DEFAULT_NAMESPACE: &str = "default";
    /// Marker kubectl prints when a named object does not exist
    pub const NOT_FOUND: &str = "not found";
}

/// Pod status values
pub mod pod {
    pub const PHASE_RUNNING: &str = "Running";
}

/// Ray specific settings
pub mod ray {
    pub const DEFAULT_CONTAINER: &str = "ray-head";
    /// Exits zero only once Ray is fully up in the container
    pub const HEALTH_CHECK_COMMAND: [&str; 2] = ["ray", "health-check"];
    pub const DEFAULT_SCRIPT_INTERPRETER: &str = "python";
    pub const RAYCLUSTER_KIND: &str = "raycluster";
}
