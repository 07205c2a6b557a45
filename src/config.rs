// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use crate::error::{LoadgenError, Result};
use crate::generator::KeyCount;
use crate::object::{ObjectKind, PayloadShape};
use crate::worker::{KindStrategy, NamespaceStrategy, WorkerSettings};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Creates Secrets and ConfigMaps with random payloads as fast as the API server accepts them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Namespace prefix, or the target namespace with --single-namespace
    #[arg(short, long, env = "KUBESTRESS_NAMESPACE", default_value = defaults::NAMESPACE)]
    pub namespace: String,

    /// Number of namespaces to create and distribute objects across
    #[arg(short = 'c', long, default_value_t = defaults::NAMESPACE_COUNT)]
    pub namespace_count: usize,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = defaults::WORKERS)]
    pub workers: usize,

    /// Create every object in --namespace instead of sharding across a namespace pool
    #[arg(long)]
    pub single_namespace: bool,

    /// Do not pre-create the namespace pool
    #[arg(long)]
    pub skip_namespace_creation: bool,

    /// Kind of object each worker creates
    #[arg(long, value_enum, default_value_t = KindArg::Alternate)]
    pub kind: KindArg,

    /// Minimum number of keys per object
    #[arg(long, default_value_t = defaults::MIN_KEYS)]
    pub min_keys: usize,

    /// Maximum number of keys per object. Objects whose data exceeds 1 MiB
    /// are rejected by the API server.
    #[arg(long, default_value_t = defaults::MAX_KEYS)]
    pub max_keys: usize,

    /// Random bytes per value, hex encoded
    #[arg(long, default_value_t = defaults::VALUE_BYTES)]
    pub value_bytes: usize,

    /// Deadline for every create call in seconds
    #[arg(long, default_value_t = defaults::TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Seconds between throughput reports
    #[arg(long, default_value_t = defaults::REPORT_INTERVAL_SECS)]
    pub report_interval_secs: u64,

    /// Path to the kubeconfig file (defaults to $KUBECONFIG, then ~/.kube/config)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Seed for reproducible payloads; worker i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    /// ConfigMaps from even workers, Secrets from odd workers
    Alternate,
    Secret,
    ConfigMap,
}

impl From<KindArg> for KindStrategy {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Alternate => KindStrategy::Alternating,
            KindArg::Secret => KindStrategy::Fixed(ObjectKind::Secret),
            KindArg::ConfigMap => KindStrategy::Fixed(ObjectKind::ConfigMap),
        }
    }
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub namespaces: NamespaceStrategy,
    /// Pre-create the sharded namespace pool before starting workers
    pub provision_namespaces: bool,
    pub workers: usize,
    pub kinds: KindStrategy,
    pub shape: PayloadShape,
    pub timeout: Duration,
    pub report_interval: Duration,
    pub kubeconfig: Option<PathBuf>,
    pub log_level: String,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.workers == 0 {
            return Err(LoadgenError::ConfigError("workers must be at least 1".to_string()));
        }
        if cli.namespace.is_empty() {
            return Err(LoadgenError::ConfigError("namespace must not be empty".to_string()));
        }
        if !cli.single_namespace && cli.namespace_count == 0 {
            return Err(LoadgenError::ConfigError(
                "namespace-count must be at least 1".to_string(),
            ));
        }
        if cli.min_keys == 0 || cli.min_keys > cli.max_keys {
            return Err(LoadgenError::ConfigError(format!(
                "key range {}..={} is invalid, need 1 <= min-keys <= max-keys",
                cli.min_keys, cli.max_keys
            )));
        }
        if cli.value_bytes == 0 {
            return Err(LoadgenError::ConfigError("value-bytes must be at least 1".to_string()));
        }
        if cli.timeout_secs == 0 || cli.report_interval_secs == 0 {
            return Err(LoadgenError::ConfigError(
                "timeout-secs and report-interval-secs must be at least 1".to_string(),
            ));
        }

        let namespaces = if cli.single_namespace {
            NamespaceStrategy::Fixed(cli.namespace)
        } else {
            NamespaceStrategy::Sharded {
                prefix: cli.namespace,
                count: cli.namespace_count,
            }
        };

        Ok(Config {
            provision_namespaces: !cli.single_namespace && !cli.skip_namespace_creation,
            namespaces,
            workers: cli.workers,
            kinds: cli.kind.into(),
            shape: PayloadShape {
                key_count: KeyCount::new(cli.min_keys, cli.max_keys),
                value_bytes: cli.value_bytes,
            },
            timeout: Duration::from_secs(cli.timeout_secs),
            report_interval: Duration::from_secs(cli.report_interval_secs),
            kubeconfig: cli.kubeconfig,
            log_level: cli.log_level,
            seed: cli.seed,
        })
    }

    pub fn worker_settings(&self) -> WorkerSettings {
        WorkerSettings {
            namespaces: self.namespaces.clone(),
            shape: self.shape,
            timeout: self.timeout,
        }
    }
}
