// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes annotation keys read by the garbage collector
pub mod annotations {
    /// Pod-template annotation written by Helm, holding the 8-char hash of
    /// the mounted ConfigMap's content
    pub const CHECKSUM_CONFIG: &str = "checksum/config";
    /// When set to "true", the ConfigMap is never deleted
    pub const PROTECT: &str = "gc.k8s.io/protect";
    /// Argo CD sync options; a PruneLast=true entry means Argo CD manages
    /// this object's deletion
    pub const ARGOCD_SYNC_OPTIONS: &str = "argocd.argoproj.io/sync-options";
}

/// Marker inside the sync-options annotation that defers pruning to Argo CD
pub const PRUNE_LAST: &str = "PruneLast=true";

/// ownerReference kind of an Argo Rollout
pub const ROLLOUT_KIND: &str = "Rollout";

/// Naming segment between a Rollout name and the checksum in the Helm
/// checksum pattern: "{rollout}-config-{hash8}"
pub const CONFIG_PREFIX_SEGMENT: &str = "-config-";

/// Argo Rollouts default when spec.revisionHistoryLimit is unset
pub const DEFAULT_REVISION_HISTORY_LIMIT: i32 = 10;
