// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespace pre-provisioning

use crate::error::Result;
use crate::kubernetes::ClusterClient;
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Name of the sharded namespace at `index`: `<prefix>-<2 hex digits>`
pub fn namespace_name(prefix: &str, index: usize) -> String {
    format!("{}-{:02x}", prefix, index)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionSummary {
    pub created: usize,
    pub failed: usize,
}

/// Create `count` namespaces one after another, writing a dot to `progress`
/// for each one created. Failures are logged and do not stop the batch.
#[instrument(skip(client, progress, shutdown))]
pub async fn provision_namespaces<C, W>(
    client: &C,
    prefix: &str,
    count: usize,
    timeout: Duration,
    progress: &mut W,
    shutdown: &CancellationToken,
) -> Result<ProvisionSummary>
where
    C: ClusterClient + ?Sized,
    W: Write,
{
    let mut summary = ProvisionSummary::default();

    for index in 0..count {
        if shutdown.is_cancelled() {
            info!("Shutdown requested, stopping namespace creation");
            break;
        }

        let name = namespace_name(prefix, index);
        match client.create_namespace(&name, timeout).await {
            Ok(()) => {
                summary.created += 1;
                write!(progress, ".")?;
                progress.flush()?;
            }
            Err(e) => {
                summary.failed += 1;
                error!("Cannot create namespace {}: {}", name, e);
            }
        }
    }
    writeln!(progress)?;

    info!(
        "Namespace creation finished: {} created, {} failed",
        summary.created, summary.failed
    );
    Ok(summary)
}
