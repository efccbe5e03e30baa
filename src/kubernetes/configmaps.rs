// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMap list and delete operations.

use std::collections::BTreeSet;

use crate::error::{GcError, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    api::{DeleteParams, ListParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

/// List the ConfigMaps in the namespace whose name starts with the given
/// prefix. Listing is unfiltered and the prefix applied client-side, since
/// name-based field selectors behave differently across cluster flavors.
#[instrument(skip(client))]
pub async fn list_config_maps(
    client: &Client,
    namespace: &str,
    prefix: &str,
) -> Result<Vec<ConfigMap>> {
    let all = list_all_config_maps(client, namespace).await?;
    Ok(all
        .into_iter()
        .filter(|cm| cm.name_any().starts_with(prefix))
        .collect())
}

/// List every ConfigMap in the namespace with no name-based filtering. Use
/// [`filter_by_checksums`] to narrow the result to those referenced by
/// Rollout ReplicaSets.
#[instrument(skip(client))]
pub async fn list_all_config_maps(client: &Client, namespace: &str) -> Result<Vec<ConfigMap>> {
    let api: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    let list = api
        .list(&ListParams::default())
        .await
        .map_err(|source| GcError::List {
            resource: "configmaps",
            namespace: namespace.to_string(),
            source,
        })?;
    debug!("{} configmaps in namespace {}", list.items.len(), namespace);
    Ok(list.items)
}

/// The subset of ConfigMaps whose name contains at least one of the given
/// checksums. Substring matching works regardless of each service's naming
/// prefix ("xzk0-seat-config-e6120fae", "other-svc-config-e6120fae", ...);
/// the tradeoff is that an 8-char token could coincidentally appear inside
/// an unrelated name. Exact delimiter-anchored suffix matching would be the
/// stricter alternative.
pub fn filter_by_checksums(cms: &[ConfigMap], checksums: &BTreeSet<String>) -> Vec<ConfigMap> {
    if checksums.is_empty() {
        return Vec::new();
    }
    cms.iter()
        .filter(|cm| {
            let name = cm.name_any();
            checksums.iter().any(|checksum| name.contains(checksum.as_str()))
        })
        .cloned()
        .collect()
}

/// Delete the named ConfigMap. Always performs a real deletion when
/// invoked; the caller is responsible for suppressing calls under dry-run.
#[instrument(skip(client))]
pub async fn delete_config_map(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let api: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);
    api.delete(name, &DeleteParams::default())
        .await
        .map_err(|source| GcError::Delete {
            name: name.to_string(),
            namespace: namespace.to_string(),
            source,
        })?;
    Ok(())
}
