// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Workers build and submit one object per iteration until shutdown.

use crate::error::{EntropyError, Result};
use crate::generator::PayloadGenerator;
use crate::kubernetes::{namespace_name, ClusterClient};
use crate::object::{build, ObjectKind, PayloadShape};
use crate::submit::submit;
use rand::RngCore;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Failed,
}

/// Emitted once per attempt, successful or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionEvent {
    /// From the start of building to the end of submission
    pub duration: Duration,
    pub outcome: Outcome,
}

/// Which namespace each object is created in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceStrategy {
    /// Every object goes to this namespace
    Fixed(String),
    /// Uniformly across `<prefix>-00` .. `<prefix>-<count - 1>`
    Sharded { prefix: String, count: usize },
}

impl NamespaceStrategy {
    pub fn pick<R: RngCore>(&self, generator: &mut PayloadGenerator<R>) -> String {
        match self {
            NamespaceStrategy::Fixed(namespace) => namespace.clone(),
            NamespaceStrategy::Sharded { prefix, count } => {
                namespace_name(prefix, generator.pick_index(*count))
            }
        }
    }
}

/// Which kind of object each worker creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindStrategy {
    /// ConfigMaps on even worker indices, Secrets on odd ones
    Alternating,
    Fixed(ObjectKind),
}

impl KindStrategy {
    pub fn kind_for(&self, worker_index: usize) -> ObjectKind {
        match self {
            KindStrategy::Alternating if worker_index % 2 == 0 => ObjectKind::ConfigMap,
            KindStrategy::Alternating => ObjectKind::Secret,
            KindStrategy::Fixed(kind) => *kind,
        }
    }
}

/// Per-worker settings shared by every worker of a run
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub namespaces: NamespaceStrategy,
    pub shape: PayloadShape,
    pub timeout: Duration,
}

pub struct Worker<C, R> {
    id: usize,
    client: C,
    kind: ObjectKind,
    generator: PayloadGenerator<R>,
    settings: WorkerSettings,
    events: mpsc::Sender<CompletionEvent>,
}

impl<C, R> Worker<C, R>
where
    C: ClusterClient,
    R: RngCore + Send,
{
    pub fn new(
        id: usize,
        client: C,
        kind: ObjectKind,
        generator: PayloadGenerator<R>,
        settings: WorkerSettings,
        events: mpsc::Sender<CompletionEvent>,
    ) -> Self {
        Self {
            id,
            client,
            kind,
            generator,
            settings,
            events,
        }
    }

    /// Loop until `shutdown` fires or the aggregator goes away. Returns the
    /// number of completed attempts. An exhausted entropy source ends the
    /// worker with an error.
    #[instrument(skip(self, shutdown), fields(worker = self.id, kind = %self.kind))]
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<u64> {
        info!("Worker started");
        let mut attempts = 0;

        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = self.attempt() => event?,
            };
            attempts += 1;

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                sent = self.events.send(event) => {
                    if sent.is_err() {
                        debug!("Aggregator gone, stopping");
                        break;
                    }
                }
            }
        }

        info!("Worker stopped after {} attempts", attempts);
        Ok(attempts)
    }

    async fn attempt(&mut self) -> std::result::Result<CompletionEvent, EntropyError> {
        let start = Instant::now();
        let namespace = self.settings.namespaces.pick(&mut self.generator);
        let object = build(&mut self.generator, &namespace, self.kind, self.settings.shape)?;

        let outcome = match submit(&self.client, &object, self.settings.timeout).await {
            Ok(()) => Outcome::Created,
            Err(e) => {
                error!("{}", e);
                Outcome::Failed
            }
        };

        Ok(CompletionEvent {
            duration: start.elapsed(),
            outcome,
        })
    }
}
