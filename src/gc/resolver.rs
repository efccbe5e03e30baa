// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-use checksum resolution from Rollout-owned ReplicaSets.

use std::collections::BTreeSet;

use crate::constants::annotations;
use crate::error::Result;
use crate::kubernetes::replicasets::{is_rollout_owned, list_rollout_replicasets};
use k8s_openapi::api::apps::v1::ReplicaSet;
use kube::Client;
use tracing::{debug, instrument};

/// Resolve the set of checksums referenced by any Rollout-owned ReplicaSet
/// in the namespace. A single list call covers every Rollout, so the result
/// can be shared across all of a namespace's GC passes.
#[instrument(skip(client))]
pub async fn resolve_in_use(client: &Client, namespace: &str) -> Result<BTreeSet<String>> {
    let replicasets = list_rollout_replicasets(client, namespace).await?;
    let checksums = collect_checksums(&replicasets);
    debug!(
        "{} in-use checksums resolved from {} replicasets",
        checksums.len(),
        replicasets.len()
    );
    Ok(checksums)
}

/// Deduplicated checksum/config values from the Rollout-owned ReplicaSets
/// in the given slice. ReplicaSets owned by anything else are ignored, and
/// those without the annotation are skipped silently; apps that do not use
/// the Helm checksum pattern simply contribute nothing.
pub fn collect_checksums(replicasets: &[ReplicaSet]) -> BTreeSet<String> {
    replicasets
        .iter()
        .filter(|rs| is_rollout_owned(rs))
        .filter_map(checksum_annotation)
        .collect()
}

/// The checksum/config value from a ReplicaSet's pod template, if present
/// and non-empty
pub fn checksum_annotation(rs: &ReplicaSet) -> Option<String> {
    rs.spec
        .as_ref()?
        .template
        .as_ref()?
        .metadata
        .as_ref()?
        .annotations
        .as_ref()?
        .get(annotations::CHECKSUM_CONFIG)
        .filter(|value| !value.is_empty())
        .cloned()
}
