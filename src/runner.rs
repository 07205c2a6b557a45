// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Coordinates a run: namespace pool, workers and the aggregator, all bound
//! to one cancellation token.

use crate::aggregator::{AggregateWindow, Aggregator, ReportSink};
use crate::config::Config;
use crate::error::{LoadgenError, Result};
use crate::generator::PayloadGenerator;
use crate::kubernetes::{provision_namespaces, ClientFactory};
use crate::worker::{NamespaceStrategy, Worker};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Attempts completed by workers, including any whose event was cut off by shutdown
    pub attempts: u64,
    pub totals: AggregateWindow,
}

/// Run until `shutdown` is cancelled. Returns once every worker and the
/// aggregator have stopped. A worker failure cancels the whole run and is
/// returned as the error.
pub async fn run<F, S>(
    config: &Config,
    factory: &F,
    sink: S,
    shutdown: CancellationToken,
) -> Result<RunSummary>
where
    F: ClientFactory,
    S: ReportSink + 'static,
{
    if let NamespaceStrategy::Sharded { prefix, count } = &config.namespaces {
        if config.provision_namespaces {
            println!("Creating {} namespaces", count);
            let client = factory.build()?;
            provision_namespaces(
                &client,
                prefix,
                *count,
                config.timeout,
                &mut std::io::stdout(),
                &shutdown,
            )
            .await?;
        }
    }

    let settings = config.worker_settings();
    let mut workers = Vec::with_capacity(config.workers);
    let (event_tx, event_rx) = mpsc::channel(config.workers);
    for id in 0..config.workers {
        let generator = match config.seed {
            Some(seed) => PayloadGenerator::seeded(seed.wrapping_add(id as u64)),
            None => PayloadGenerator::from_entropy()?,
        };
        workers.push(Worker::new(
            id,
            factory.build()?,
            config.kinds.kind_for(id),
            generator,
            settings.clone(),
            event_tx.clone(),
        ));
    }
    drop(event_tx);

    let aggregator = tokio::spawn(
        Aggregator::new(event_rx, config.report_interval, sink).run(shutdown.clone()),
    );

    info!("Starting {} workers", config.workers);
    let mut tasks = JoinSet::new();
    for worker in workers {
        tasks.spawn(worker.run(shutdown.clone()));
    }

    let mut attempts = 0;
    let mut failure: Option<LoadgenError> = None;
    while let Some(joined) = tasks.join_next().await {
        let err = match joined {
            Ok(Ok(n)) => {
                attempts += n;
                continue;
            }
            Ok(Err(e)) => e,
            Err(e) => LoadgenError::TaskError(e),
        };
        error!("Worker failed, stopping run: {}", err);
        shutdown.cancel();
        failure.get_or_insert(err);
    }

    let totals = aggregator.await?;
    match failure {
        Some(err) => Err(err),
        None => Ok(RunSummary { attempts, totals }),
    }
}
