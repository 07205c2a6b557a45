// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

use crate::object::ObjectKind;

#[derive(Error, Debug)]
pub enum LoadgenError {
    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Failed to create client: {0}")]
    ClientBuildError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(transparent)]
    EntropyError(#[from] EntropyError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, LoadgenError>;

/// The random source could not supply bytes.
#[derive(Error, Debug)]
#[error("Entropy source unavailable: {0}")]
pub struct EntropyError(#[from] pub rand::Error);

/// Failure of a single call against the cluster.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Deadline of {0:?} exceeded")]
    Timeout(Duration),
}

pub type ClientResult = std::result::Result<(), ClientError>;

/// A create call for a generated object failed.
#[derive(Error, Debug)]
#[error("Failed to create {kind} {namespace}/{name}: {cause}")]
pub struct SubmitError {
    pub kind: ObjectKind,
    pub namespace: String,
    pub name: String,
    #[source]
    pub cause: ClientError,
}
