// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Core garbage-collection logic: in-use checksum resolution, retention
//! planning, and the per-namespace cycle that ties them together.

pub mod planner;
pub mod resolver;
pub mod runner;

pub use planner::{plan, ConfigMapCandidate};
pub use resolver::{collect_checksums, resolve_in_use};
pub use runner::run_namespace;
