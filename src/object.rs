// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generated objects and their Kubernetes representations.

use crate::constants::naming::{CONFIG_MAP_PREFIX, SECRET_PREFIX};
use crate::constants::SECRET_TYPE;
use crate::error::EntropyError;
use crate::generator::{KeyCount, PayloadGenerator};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::api::ObjectMeta;
use rand::RngCore;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Secret,
    ConfigMap,
}

impl ObjectKind {
    /// Prefix for names of objects of this kind
    pub fn name_prefix(&self) -> &'static str {
        match self {
            ObjectKind::Secret => SECRET_PREFIX,
            ObjectKind::ConfigMap => CONFIG_MAP_PREFIX,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Secret => f.write_str("secret"),
            ObjectKind::ConfigMap => f.write_str("configmap"),
        }
    }
}

/// Payload shape for built objects
#[derive(Debug, Clone, Copy)]
pub struct PayloadShape {
    pub key_count: KeyCount,
    pub value_bytes: usize,
}

/// A randomized object ready to be submitted. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedObject {
    pub name: String,
    pub namespace: String,
    pub kind: ObjectKind,
    pub payload: BTreeMap<String, String>,
}

/// Build a fresh object of `kind` in `namespace`
pub fn build<R: RngCore>(
    generator: &mut PayloadGenerator<R>,
    namespace: &str,
    kind: ObjectKind,
    shape: PayloadShape,
) -> Result<GeneratedObject, EntropyError> {
    let name = generator.generate_name(kind.name_prefix())?;
    let key_count = generator.sample_key_count(shape.key_count);
    let payload = generator.generate_payload(key_count, shape.value_bytes)?;

    Ok(GeneratedObject {
        name,
        namespace: namespace.to_string(),
        kind,
        payload,
    })
}

fn metadata(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

/// Opaque Secret carrying the payload as `stringData`
pub fn secret_manifest(namespace: &str, name: &str, payload: &BTreeMap<String, String>) -> Secret {
    Secret {
        metadata: metadata(namespace, name),
        string_data: Some(payload.clone()),
        type_: Some(SECRET_TYPE.to_string()),
        ..Default::default()
    }
}

pub fn config_map_manifest(
    namespace: &str,
    name: &str,
    payload: &BTreeMap<String, String>,
) -> ConfigMap {
    ConfigMap {
        metadata: metadata(namespace, name),
        data: Some(payload.clone()),
        ..Default::default()
    }
}
