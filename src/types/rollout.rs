// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REVISION_HISTORY_LIMIT;

/// The subset of the Argo Rollouts spec the garbage collector reads. A
/// Rollout named "foo" manages the ConfigMaps named "foo-config-{hash8}".
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "argoproj.io", version = "v1alpha1", kind = "Rollout")]
#[kube(namespaced)]
#[serde(rename_all = "camelCase")]
pub struct RolloutSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
}

impl Rollout {
    /// revisionHistoryLimit from the spec, or the Argo Rollouts default of
    /// 10 when the field is unset
    pub fn revision_history_limit(&self) -> i32 {
        self.spec
            .revision_history_limit
            .unwrap_or(DEFAULT_REVISION_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_rollout(name: &str, revision_history_limit: Option<i32>) -> Rollout {
        Rollout {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some("mwpcloud".to_string()),
                ..Default::default()
            },
            spec: RolloutSpec {
                replicas: None,
                revision_history_limit,
                paused: None,
            },
        }
    }

    #[test]
    fn test_revision_history_limit_from_spec() {
        let rollout = make_rollout("xzk0-seat", Some(3));
        assert_eq!(rollout.revision_history_limit(), 3);
    }

    #[test]
    fn test_revision_history_limit_default_when_unset() {
        let rollout = make_rollout("xzk0-seat", None);
        assert_eq!(rollout.revision_history_limit(), 10);
    }
}
