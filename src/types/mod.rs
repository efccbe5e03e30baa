// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types consumed by the garbage collector.

pub mod rollout;

pub use rollout::Rollout;
