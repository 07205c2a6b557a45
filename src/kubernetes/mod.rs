// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes plumbing: the cluster client seam, kubeconfig loading and namespace pre-provisioning.

pub mod client;
pub mod namespaces;

pub use client::{
    resolve_kubeconfig_path, ClientFactory, ClusterClient, KubeClientFactory, KubeClusterClient,
};
pub use namespaces::{namespace_name, provision_namespaces, ProvisionSummary};
