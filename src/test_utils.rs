// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request
/// method and path.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("DELETE".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        // Try exact match first
        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Try prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// A mock ReplicaSet with the given owner kind and checksum/config
/// annotation on its pod template
pub fn replicaset_json(
    name: &str,
    owner_kind: Option<&str>,
    checksum: Option<&str>,
) -> serde_json::Value {
    let mut metadata = serde_json::json!({
        "name": name,
        "namespace": "mwpcloud",
        "uid": "855e8f1e-7124-4c1a-9959-1ce7847b780f"
    });
    if let Some(kind) = owner_kind {
        metadata["ownerReferences"] = serde_json::json!([{
            "apiVersion": "argoproj.io/v1alpha1",
            "kind": kind,
            "name": "xzk0-seat",
            "uid": "855e8f1e-7124-4c1a-9959-1ce7847b780f",
            "controller": true,
            "blockOwnerDeletion": true
        }]);
    }

    let mut template_metadata = serde_json::json!({});
    if let Some(value) = checksum {
        template_metadata["annotations"] = serde_json::json!({ "checksum/config": value });
    }

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "ReplicaSet",
        "metadata": metadata,
        "spec": {
            "selector": { "matchLabels": { "app": "xzk0-seat" } },
            "template": { "metadata": template_metadata }
        }
    })
}

/// A ReplicaSetList response body
pub fn replicaset_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "ReplicaSetList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// A mock ConfigMap with a creation timestamp and annotation pairs
pub fn config_map_json(
    name: &str,
    created_at: &str,
    annotations: &[(&str, &str)],
) -> serde_json::Value {
    let mut metadata = serde_json::json!({
        "name": name,
        "namespace": "mwpcloud",
        "uid": "test-uid",
        "creationTimestamp": created_at
    });
    if !annotations.is_empty() {
        let map: serde_json::Map<String, serde_json::Value> = annotations
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        metadata["annotations"] = serde_json::Value::Object(map);
    }

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": metadata
    })
}

/// A ConfigMapList response body
pub fn config_map_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMapList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// A mock Argo Rollout with an optional revisionHistoryLimit
pub fn rollout_json(name: &str, revision_history_limit: Option<i32>) -> serde_json::Value {
    let mut spec = serde_json::json!({});
    if let Some(limit) = revision_history_limit {
        spec["revisionHistoryLimit"] = serde_json::json!(limit);
    }

    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "Rollout",
        "metadata": {
            "name": name,
            "namespace": "mwpcloud",
            "uid": "test-uid"
        },
        "spec": spec
    })
}

/// A RolloutList response body
pub fn rollout_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "RolloutList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// A 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
