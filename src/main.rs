// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kubestress::aggregator::StdoutSink;
use kubestress::config::{Cli, Config};
use kubestress::kubernetes::{resolve_kubeconfig_path, KubeClientFactory};
use kubestress::runner;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;

    // Logs go to stderr, stdout carries the progress dots and reports
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting kubestress");

    let kubeconfig = resolve_kubeconfig_path(config.kubeconfig.clone())?;
    let factory = KubeClientFactory::from_kubeconfig_file(&kubeconfig)
        .await
        .context("Cannot build kubeconfig")?;
    println!("Using kubeconfig: {}", kubeconfig.display());

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let summary = runner::run(&config, &factory, StdoutSink, shutdown).await?;
    info!(
        "Stopped after {} attempts ({} counted, {} failed)",
        summary.attempts, summary.totals.total_count, summary.totals.total_failed
    );
    Ok(())
}

/// Cancel `shutdown` on Ctrl+C or SIGTERM
async fn cancel_on_signal(shutdown: CancellationToken) {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
    shutdown.cancel();
}
