// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Thin Kubernetes API accessors. All retention policy lives in crate::gc;
//! these functions only list, filter, and delete.

pub mod configmaps;
pub mod replicasets;
pub mod rollouts;

pub use configmaps::{delete_config_map, filter_by_checksums, list_all_config_maps, list_config_maps};
pub use replicasets::list_rollout_replicasets;
pub use rollouts::list_rollouts;
