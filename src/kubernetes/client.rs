// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client abstraction, kubeconfig loading and per-worker client creation

use crate::constants::KUBECONFIG_ENV;
use crate::error::{ClientError, ClientResult, LoadgenError, Result};
use crate::object::{config_map_manifest, secret_manifest};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{ConfigMap, Namespace, Secret};
use kube::api::{ObjectMeta, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config as KConfig};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Create calls the load generator issues against a cluster.
/// Every call is bounded by `timeout`.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn create_namespace(&self, name: &str, timeout: Duration) -> ClientResult;

    async fn create_secret(
        &self,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult;

    async fn create_config_map(
        &self,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult;
}

/// Builds independent cluster clients, one per worker
pub trait ClientFactory: Send + Sync {
    type Client: ClusterClient + 'static;

    fn build(&self) -> Result<Self::Client>;
}

/// [`ClusterClient`] backed by a kube client
#[derive(Clone)]
pub struct KubeClusterClient {
    client: Client,
}

impl KubeClusterClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

async fn with_deadline<T, F>(timeout: Duration, call: F) -> ClientResult
where
    F: Future<Output = std::result::Result<T, kube::Error>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(ClientError::KubeError(e)),
        Err(_) => Err(ClientError::Timeout(timeout)),
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn create_namespace(&self, name: &str, timeout: Duration) -> ClientResult {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let ns = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        with_deadline(timeout, namespaces.create(&PostParams::default(), &ns)).await
    }

    async fn create_secret(
        &self,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = secret_manifest(namespace, name, payload);
        with_deadline(timeout, secrets.create(&PostParams::default(), &secret)).await
    }

    async fn create_config_map(
        &self,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult {
        let config_maps: Api<ConfigMap> = Api::namespaced(self.client.clone(), namespace);
        let config_map = config_map_manifest(namespace, name, payload);
        with_deadline(timeout, config_maps.create(&PostParams::default(), &config_map)).await
    }
}

/// Builds a fresh kube client from a shared client configuration every time,
/// so workers never share connection state.
#[derive(Clone, Debug)]
pub struct KubeClientFactory {
    config: KConfig,
}

impl KubeClientFactory {
    pub fn new(config: KConfig) -> Self {
        Self { config }
    }

    /// Load the kubeconfig file at `path` and use it for every client
    #[instrument]
    pub async fn from_kubeconfig_file(path: &Path) -> Result<Self> {
        let kubeconfig = tokio::fs::read_to_string(path).await.map_err(|e| {
            LoadgenError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = config_from_kubeconfig(&kubeconfig).await?;
        debug!("Cluster URL: {}", config.cluster_url);
        Ok(Self::new(config))
    }
}

impl ClientFactory for KubeClientFactory {
    type Client = KubeClusterClient;

    fn build(&self) -> Result<KubeClusterClient> {
        let client = Client::try_from(self.config.clone())
            .map_err(|e| LoadgenError::ClientBuildError(e.to_string()))?;
        Ok(KubeClusterClient::new(client))
    }
}

/// Explicit path if given, `$KUBECONFIG` otherwise, then `~/.kube/config`
pub fn resolve_kubeconfig_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    resolve_from(explicit, std::env::var_os(KUBECONFIG_ENV), dirs::home_dir())
}

fn resolve_from(
    explicit: Option<PathBuf>,
    env: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    // An empty $KUBECONFIG counts as unset
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let home = home.ok_or_else(|| {
        LoadgenError::KubeconfigError("Cannot determine user home dir".to_string())
    })?;
    Ok(home.join(".kube").join("config"))
}

/// Create a client configuration from a kubeconfig document
pub async fn config_from_kubeconfig(kubeconfig: &str) -> Result<KConfig> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| LoadgenError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
        .await
        .map_err(|e| LoadgenError::KubeconfigError(format!("Failed to create config: {}", e)))
}
