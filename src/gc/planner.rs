// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retention planning for versioned ConfigMaps.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{annotations, PRUNE_LAST};
use k8s_openapi::chrono::{DateTime, Duration, Utc};

/// One ConfigMap under consideration for deletion
#[derive(Debug, Clone)]
pub struct ConfigMapCandidate {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub annotations: BTreeMap<String, String>,
}

/// Decide which of the candidates are safe to delete.
///
/// The `keep_last` newest candidates are kept unconditionally. Each of the
/// rest is deleted unless its name is in the in-use set, it carries a
/// protection annotation, Argo CD manages its pruning, or it is younger
/// than `keep_days` days. Inputs are never mutated and the result is a
/// duplicate-free subset of the candidate names; identical inputs
/// (including `now`) always produce the identical plan.
pub fn plan(
    candidates: &[ConfigMapCandidate],
    in_use: &BTreeSet<String>,
    keep_last: usize,
    keep_days: u64,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut ordered: Vec<&ConfigMapCandidate> = candidates.iter().collect();
    // Newest first; ties broken by name so repeated runs over identical
    // input produce identical plans.
    ordered.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.name.cmp(&b.name))
    });

    ordered
        .into_iter()
        .skip(keep_last)
        .filter(|candidate| !in_use.contains(&candidate.name))
        .filter(|candidate| !is_protected(candidate))
        .filter(|candidate| !is_prune_last(candidate))
        .filter(|candidate| is_old_enough(candidate, keep_days, now))
        .map(|candidate| candidate.name.clone())
        .collect()
}

/// gc.k8s.io/protect set to "true" pins a ConfigMap regardless of age or
/// usage
fn is_protected(candidate: &ConfigMapCandidate) -> bool {
    candidate
        .annotations
        .get(annotations::PROTECT)
        .is_some_and(|value| value == "true")
}

/// A sync-options annotation containing PruneLast=true means an external
/// tool owns this ConfigMap's deletion
fn is_prune_last(candidate: &ConfigMapCandidate) -> bool {
    candidate
        .annotations
        .get(annotations::ARGOCD_SYNC_OPTIONS)
        .is_some_and(|value| value.contains(PRUNE_LAST))
}

/// keep_days of 0 disables the age threshold entirely
fn is_old_enough(candidate: &ConfigMapCandidate, keep_days: u64, now: DateTime<Utc>) -> bool {
    if keep_days == 0 {
        return true;
    }
    now.signed_duration_since(candidate.created_at) >= Duration::hours(24 * keep_days as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::chrono::TimeZone;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 13, 0, 0, 0).unwrap()
    }

    fn make_candidate(name: &str, age_days: i64) -> ConfigMapCandidate {
        ConfigMapCandidate {
            name: name.to_string(),
            created_at: base_time() - Duration::days(age_days),
            annotations: BTreeMap::new(),
        }
    }

    fn with_annotation(mut candidate: ConfigMapCandidate, key: &str, value: &str) -> ConfigMapCandidate {
        candidate.annotations.insert(key.to_string(), value.to_string());
        candidate
    }

    /// The recurring cluster state: five revisions aged 5..30 days, four of
    /// them still referenced by ReplicaSets.
    fn five_revisions() -> Vec<ConfigMapCandidate> {
        vec![
            make_candidate("xzk0-seat-config-e6120fae", 5),
            make_candidate("xzk0-seat-config-b870a608", 10),
            make_candidate("xzk0-seat-config-f3bca2cb", 15),
            make_candidate("xzk0-seat-config-d5eb6ebf", 20),
            make_candidate("xzk0-seat-config-da8762a8", 30),
        ]
    }

    fn four_in_use() -> BTreeSet<String> {
        [
            "xzk0-seat-config-e6120fae",
            "xzk0-seat-config-b870a608",
            "xzk0-seat-config-f3bca2cb",
            "xzk0-seat-config-d5eb6ebf",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_plan_empty_candidates() {
        let deletes = plan(&[], &BTreeSet::new(), 5, 7, base_time());
        assert!(deletes.is_empty());
    }

    #[test]
    fn test_plan_keep_last_covers_all() {
        let deletes = plan(&five_revisions(), &four_in_use(), 5, 7, base_time());
        assert!(deletes.is_empty());
    }

    #[test]
    fn test_plan_deletes_single_orphan() {
        let deletes = plan(&five_revisions(), &four_in_use(), 4, 7, base_time());
        assert_eq!(deletes, vec!["xzk0-seat-config-da8762a8"]);
    }

    #[test]
    fn test_plan_in_use_never_deleted() {
        // Even with no retention at all, the four referenced revisions stay.
        let deletes = plan(&five_revisions(), &four_in_use(), 0, 0, base_time());
        assert_eq!(deletes, vec!["xzk0-seat-config-da8762a8"]);
    }

    #[test]
    fn test_plan_keep_last_zero_and_keep_days_zero_deletes_everything_unreferenced() {
        let deletes = plan(&five_revisions(), &BTreeSet::new(), 0, 0, base_time());
        assert_eq!(deletes.len(), 5);
    }

    #[test]
    fn test_plan_age_threshold_excludes_young() {
        // keep_last 0, keep_days 7: the 5-day-old revision is too new.
        let deletes = plan(&five_revisions(), &BTreeSet::new(), 0, 7, base_time());
        assert!(!deletes.contains(&"xzk0-seat-config-e6120fae".to_string()));
        assert_eq!(deletes.len(), 4);
    }

    #[test]
    fn test_plan_age_boundary_is_inclusive() {
        // Exactly keep_days old is old enough.
        let candidates = vec![make_candidate("xzk0-seat-config-b870a608", 7)];
        let deletes = plan(&candidates, &BTreeSet::new(), 0, 7, base_time());
        assert_eq!(deletes, vec!["xzk0-seat-config-b870a608"]);
    }

    #[test]
    fn test_plan_protect_annotation_excludes() {
        let candidates = vec![with_annotation(
            make_candidate("xzk0-seat-config-da8762a8", 30),
            annotations::PROTECT,
            "true",
        )];
        let deletes = plan(&candidates, &BTreeSet::new(), 0, 0, base_time());
        assert!(deletes.is_empty());
    }

    #[test]
    fn test_plan_protect_annotation_other_value_ignored() {
        let candidates = vec![with_annotation(
            make_candidate("xzk0-seat-config-da8762a8", 30),
            annotations::PROTECT,
            "yes",
        )];
        let deletes = plan(&candidates, &BTreeSet::new(), 0, 0, base_time());
        assert_eq!(deletes, vec!["xzk0-seat-config-da8762a8"]);
    }

    #[test]
    fn test_plan_prune_last_annotation_excludes() {
        let candidates = vec![with_annotation(
            make_candidate("xzk0-seat-config-da8762a8", 30),
            annotations::ARGOCD_SYNC_OPTIONS,
            "Validate=false,PruneLast=true",
        )];
        let deletes = plan(&candidates, &BTreeSet::new(), 0, 0, base_time());
        assert!(deletes.is_empty());
    }

    #[test]
    fn test_plan_keep_last_exempts_newest_regardless_of_age() {
        // Both revisions are far past the age threshold; the newest one is
        // still exempt.
        let candidates = vec![
            make_candidate("xzk0-seat-config-b870a608", 50),
            make_candidate("xzk0-seat-config-da8762a8", 60),
        ];
        let deletes = plan(&candidates, &BTreeSet::new(), 1, 7, base_time());
        assert_eq!(deletes, vec!["xzk0-seat-config-da8762a8"]);
    }

    #[test]
    fn test_plan_keep_last_exceeding_count_keeps_all() {
        let candidates = vec![make_candidate("xzk0-seat-config-da8762a8", 60)];
        let deletes = plan(&candidates, &BTreeSet::new(), 3, 0, base_time());
        assert!(deletes.is_empty());
    }

    #[test]
    fn test_plan_result_is_subset_without_duplicates() {
        let deletes = plan(&five_revisions(), &BTreeSet::new(), 0, 0, base_time());
        let names: BTreeSet<String> = five_revisions().iter().map(|c| c.name.clone()).collect();
        let unique: BTreeSet<String> = deletes.iter().cloned().collect();
        assert_eq!(unique.len(), deletes.len());
        assert!(deletes.iter().all(|name| names.contains(name)));
    }

    #[test]
    fn test_plan_idempotent() {
        let candidates = five_revisions();
        let in_use = four_in_use();
        let first = plan(&candidates, &in_use, 2, 7, base_time());
        let second = plan(&candidates, &in_use, 2, 7, base_time());
        assert_eq!(first, second);
    }

    #[test]
    fn test_plan_timestamp_ties_break_by_name() {
        // Two candidates created at the same instant: the keep_last slot
        // must go to the same one on every run.
        let candidates = vec![
            make_candidate("xzk0-seat-config-bbbbbbbb", 10),
            make_candidate("xzk0-seat-config-aaaaaaaa", 10),
        ];
        let deletes = plan(&candidates, &BTreeSet::new(), 1, 0, base_time());
        assert_eq!(deletes, vec!["xzk0-seat-config-bbbbbbbb"]);
    }

    #[test]
    fn test_plan_does_not_mutate_inputs() {
        let candidates = five_revisions();
        let in_use = four_in_use();
        let before: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        let _ = plan(&candidates, &in_use, 1, 7, base_time());
        let after: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(in_use.len(), 4);
    }
}
