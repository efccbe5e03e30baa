// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use futures::future::join_all;
use k8s_openapi::chrono::Utc;
use kube::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use configmap_gc::config::{Cli, Config};
use configmap_gc::gc::runner;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    config.apply_cli(&cli);

    init_tracing(&config);

    info!(
        "starting configmap-gc: namespaces={:?} keep_last={} keep_days={} dry_run={}",
        config.namespaces, config.keep_last, config.keep_days, config.dry_run
    );
    if config.dry_run {
        info!("[DRY-RUN] mode enabled, no ConfigMaps will be deleted");
    }

    let client = Client::try_default().await?;
    info!("connected to Kubernetes cluster");

    // One task per namespace, all joined before the process reports its
    // outcome. A failed namespace never aborts the others.
    let now = Utc::now();
    let tasks = config.namespaces.iter().cloned().map(|namespace| {
        let client = client.clone();
        let config = config.clone();
        tokio::spawn(async move { runner::run_namespace(&client, &namespace, &config, now).await })
    });

    let results = join_all(tasks).await;
    // A panicked task counts as a failed namespace.
    let any_failed = results.into_iter().any(|joined| joined.unwrap_or(true));

    if any_failed {
        error!("garbage collection failed in one or more namespaces");
        std::process::exit(2);
    }
    Ok(())
}

/// Build the global subscriber from the configured level and format.
/// RUST_LOG takes precedence over LOG_LEVEL when set.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
