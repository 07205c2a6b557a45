// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Submission of generated objects, one attempt per object.

use crate::error::SubmitError;
use crate::kubernetes::ClusterClient;
use crate::object::{GeneratedObject, ObjectKind};
use std::time::Duration;
use tracing::{instrument, trace};

/// Create `object` in the cluster within `timeout`. Never retries; a timed out
/// call may still have created the object server-side.
#[instrument(
    level = "trace",
    skip(client, object),
    fields(kind = %object.kind, namespace = %object.namespace, name = %object.name)
)]
pub async fn submit<C>(client: &C, object: &GeneratedObject, timeout: Duration) -> Result<(), SubmitError>
where
    C: ClusterClient + ?Sized,
{
    let result = match object.kind {
        ObjectKind::Secret => {
            client
                .create_secret(&object.namespace, &object.name, &object.payload, timeout)
                .await
        }
        ObjectKind::ConfigMap => {
            client
                .create_config_map(&object.namespace, &object.name, &object.payload, timeout)
                .await
        }
    };

    result.map_err(|cause| SubmitError {
        kind: object.kind,
        namespace: object.namespace.clone(),
        name: object.name.clone(),
        cause,
    })?;

    trace!("Created {} {}/{}", object.kind, object.namespace, object.name);
    Ok(())
}
