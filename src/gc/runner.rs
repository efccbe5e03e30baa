// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One garbage-collection cycle per namespace: discover Rollouts, resolve
//! the in-use checksum set once, then plan and execute deletions for each
//! Rollout's ConfigMap prefix.

use std::collections::BTreeSet;

use crate::config::Config;
use crate::constants::CONFIG_PREFIX_SEGMENT;
use crate::gc::planner::{self, ConfigMapCandidate};
use crate::gc::resolver;
use crate::kubernetes::{configmaps, rollouts};
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::chrono::{DateTime, Utc};
use kube::{Client, ResourceExt};
use tracing::{debug, error, info, instrument};

/// Run the full GC cycle for one namespace. Returns true when any list or
/// delete operation failed; a failure in one Rollout's pass never aborts
/// the others.
#[instrument(skip(client, config, now))]
pub async fn run_namespace(
    client: &Client,
    namespace: &str,
    config: &Config,
    now: DateTime<Utc>,
) -> bool {
    let rollouts = match rollouts::list_rollouts(client, namespace).await {
        Ok(rollouts) => rollouts,
        Err(e) => {
            error!("{}", e);
            return true;
        }
    };

    let rollout_names: Vec<String> = rollouts.iter().map(|r| r.name_any()).collect();
    info!("discovered {} rollouts: {:?}", rollout_names.len(), rollout_names);

    if rollout_names.is_empty() {
        info!("no rollouts found in namespace, nothing to do");
        return false;
    }
    for rollout in &rollouts {
        debug!(
            "rollout {} retains {} revisions",
            rollout.name_any(),
            rollout.revision_history_limit()
        );
    }

    // One API call covers the ReplicaSets of every Rollout in the namespace.
    let checksums = match resolver::resolve_in_use(client, namespace).await {
        Ok(checksums) => checksums,
        Err(e) => {
            error!("{}", e);
            return true;
        }
    };
    info!("resolved {} in-use checksums: {:?}", checksums.len(), checksums);

    let mut any_failed = false;
    for rollout_name in &rollout_names {
        let prefix = format!("{}{}", rollout_name, CONFIG_PREFIX_SEGMENT);
        if run_rollout(client, namespace, &prefix, config, &checksums, now).await {
            any_failed = true;
        }
    }
    any_failed
}

/// GC pass for a single Rollout's ConfigMap prefix, using the in-use
/// checksum set shared across the namespace. Returns true on any failure.
#[instrument(skip(client, config, checksums, now))]
async fn run_rollout(
    client: &Client,
    namespace: &str,
    prefix: &str,
    config: &Config,
    checksums: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> bool {
    let candidate_cms = match configmaps::list_config_maps(client, namespace, prefix).await {
        Ok(cms) => cms,
        Err(e) => {
            error!("{}", e);
            return true;
        }
    };
    info!("{} configmaps match prefix {}", candidate_cms.len(), prefix);

    if candidate_cms.is_empty() {
        info!("no configmaps match prefix, nothing to do");
        return false;
    }

    let in_use = in_use_names(&candidate_cms, checksums);
    debug!("in-use configmaps: {:?}", in_use);

    let candidates: Vec<ConfigMapCandidate> = candidate_cms
        .iter()
        .map(|cm| candidate_from(cm, now))
        .collect();

    let to_delete = planner::plan(&candidates, &in_use, config.keep_last, config.keep_days, now);
    info!("{} configmaps eligible for deletion", to_delete.len());

    if to_delete.is_empty() {
        return false;
    }

    for name in &to_delete {
        let age_days = candidates
            .iter()
            .find(|candidate| &candidate.name == name)
            .map(|candidate| now.signed_duration_since(candidate.created_at).num_days())
            .unwrap_or(0);
        if config.dry_run {
            info!("[DRY-RUN] would delete configmap {} (age {} days)", name, age_days);
        } else {
            info!("deleting configmap {} (age {} days)", name, age_days);
        }
    }

    if config.dry_run {
        info!(
            "[DRY-RUN] completed, no deletions performed ({} planned)",
            to_delete.len()
        );
        return false;
    }

    // Best-effort: a failed deletion is logged and counted, the rest of the
    // list is still attempted.
    let mut failed = 0usize;
    for name in &to_delete {
        match configmaps::delete_config_map(client, namespace, name).await {
            Ok(()) => info!("deleted configmap {}", name),
            Err(e) => {
                error!("{}", e);
                failed += 1;
            }
        }
    }
    info!("gc completed: {} deleted, {} failed", to_delete.len() - failed, failed);
    failed > 0
}

/// Full names of the candidates referenced by at least one in-use checksum
fn in_use_names(cms: &[ConfigMap], checksums: &BTreeSet<String>) -> BTreeSet<String> {
    configmaps::filter_by_checksums(cms, checksums)
        .iter()
        .map(|cm| cm.name_any())
        .collect()
}

/// Planner view of a ConfigMap. A missing creationTimestamp (never the case
/// for objects returned by the API server) is treated as created now, which
/// keeps the object out of age-based deletion.
fn candidate_from(cm: &ConfigMap, now: DateTime<Utc>) -> ConfigMapCandidate {
    ConfigMapCandidate {
        name: cm.name_any(),
        created_at: cm
            .metadata
            .creation_timestamp
            .as_ref()
            .map(|time| time.0)
            .unwrap_or(now),
        annotations: cm.metadata.annotations.clone().unwrap_or_default(),
    }
}
