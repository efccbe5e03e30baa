// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rollout discovery. The only non-core API this tool depends on
//! (argoproj.io/v1alpha1), available wherever Argo Rollouts is installed.

use crate::error::{GcError, Result};
use crate::types::Rollout;
use kube::{api::ListParams, Api, Client};
use tracing::{debug, instrument};

/// List all Rollouts in the namespace. Each one drives a GC pass over the
/// ConfigMaps matching its derived name prefix.
#[instrument(skip(client))]
pub async fn list_rollouts(client: &Client, namespace: &str) -> Result<Vec<Rollout>> {
    let api: Api<Rollout> = Api::namespaced(client.clone(), namespace);
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|source| GcError::List {
            resource: "rollouts",
            namespace: namespace.to_string(),
            source,
        })?;
    debug!("{} rollouts in namespace {}", list.items.len(), namespace);
    Ok(list.items)
}
