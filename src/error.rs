// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("failed to list {resource} in namespace {namespace}: {source}")]
    List {
        resource: &'static str,
        namespace: String,
        source: kube::Error,
    },

    #[error("failed to delete configmap {name} in namespace {namespace}: {source}")]
    Delete {
        name: String,
        namespace: String,
        source: kube::Error,
    },
}

pub type Result<T> = std::result::Result<T, GcError>;
