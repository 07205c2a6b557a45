// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Defaults for the command line surface
pub mod defaults {
    /// Namespace prefix, or the fixed namespace in single-namespace mode
    pub const NAMESPACE: &str = "default";
    /// Number of namespaces pre-created and sharded across
    pub const NAMESPACE_COUNT: usize = 256;
    /// Number of concurrent workers
    pub const WORKERS: usize = 8;
    /// Key count range per generated object. The largest default object stays
    /// well below the API server's 1 MiB data limit.
    pub const MIN_KEYS: usize = 1;
    pub const MAX_KEYS: usize = 90;
    /// Random bytes per payload value (hex encoding doubles this)
    pub const VALUE_BYTES: usize = 2048;
    /// Deadline applied to every create call
    pub const TIMEOUT_SECS: u64 = 10;
    /// Interval between throughput reports
    pub const REPORT_INTERVAL_SECS: u64 = 10;
    pub const LOG_LEVEL: &str = "info";
}

/// Object naming
pub mod naming {
    /// Random bytes in the suffix of every generated name
    pub const NAME_RANDOM_BYTES: usize = 16;
    pub const SECRET_PREFIX: &str = "secret";
    pub const CONFIG_MAP_PREFIX: &str = "cm";
    pub const KEY_PREFIX: &str = "key";
}

/// Environment variable naming the kubeconfig file
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Secret type used for every generated Secret
pub const SECRET_TYPE: &str = "Opaque";
