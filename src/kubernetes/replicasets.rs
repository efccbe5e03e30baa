// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ReplicaSet listing scoped to Argo Rollout ownership.

use crate::constants::ROLLOUT_KIND;
use crate::error::{GcError, Result};
use k8s_openapi::api::apps::v1::ReplicaSet;
use kube::{api::ListParams, Api, Client};
use tracing::{debug, instrument};

/// List every ReplicaSet in the namespace owned by an Argo Rollout. This
/// covers the active ReplicaSet of each Rollout and all history revisions
/// retained by its revisionHistoryLimit.
#[instrument(skip(client))]
pub async fn list_rollout_replicasets(client: &Client, namespace: &str) -> Result<Vec<ReplicaSet>> {
    let api: Api<ReplicaSet> = Api::namespaced(client.clone(), namespace);
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|source| GcError::List {
            resource: "replicasets",
            namespace: namespace.to_string(),
            source,
        })?;

    let owned: Vec<ReplicaSet> = list.items.into_iter().filter(is_rollout_owned).collect();
    debug!("{} rollout-owned replicasets in namespace {}", owned.len(), namespace);
    Ok(owned)
}

/// Check whether any ownerReference on the ReplicaSet points to a Rollout.
/// ReplicaSets owned by a Deployment (or nothing) do not participate in
/// checksum resolution.
pub fn is_rollout_owned(rs: &ReplicaSet) -> bool {
    rs.metadata
        .owner_references
        .as_ref()
        .is_some_and(|refs| refs.iter().any(|r| r.kind == ROLLOUT_KIND))
}
