// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and cluster clients.

use crate::aggregator::{ReportSink, ThroughputReport};
use crate::error::{ClientError, ClientResult, Result};
use crate::kubernetes::{ClientFactory, ClusterClient};
use crate::object::ObjectKind;
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::Client;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
    delay: Option<Duration>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("POST".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Hold every response back for `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Method and path of every request received so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();
        responses
            .get(&(method.to_string(), path.to_string()))
            .cloned()
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
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);
        self.requests.lock().unwrap().push((method, path));
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let (status, body) = response.unwrap_or_else(|| (404, status_json(404, "NotFound", "not found")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

pub fn secret_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "type": "Opaque"
    })
    .to_string()
}

pub fn config_map_json(namespace: &str, name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a failure Status response
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// How a [`FakeClusterClient`] answers create calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBehavior {
    Succeed,
    Reject,
    /// Never answer; the call runs into its deadline
    Hang,
}

/// A create recorded by a [`FakeClusterClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeCreate {
    pub kind: ObjectKind,
    pub namespace: String,
    pub name: String,
    pub keys: usize,
}

#[derive(Default)]
struct FakeState {
    namespaces: Vec<String>,
    objects: Vec<FakeCreate>,
}

/// In-memory cluster client. Clones share the recorded state.
#[derive(Clone)]
pub struct FakeClusterClient {
    state: Arc<Mutex<FakeState>>,
    attempts: Arc<AtomicUsize>,
    behavior: FakeBehavior,
    latency: Option<Duration>,
}

impl FakeClusterClient {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
            attempts: Arc::new(AtomicUsize::new(0)),
            behavior,
            latency: None,
        }
    }

    /// Wait `latency` before answering every call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Namespaces created so far, in call order
    pub fn namespaces(&self) -> Vec<String> {
        self.state.lock().unwrap().namespaces.clone()
    }

    /// Objects created so far, in call order
    pub fn objects(&self) -> Vec<FakeCreate> {
        self.state.lock().unwrap().objects.clone()
    }

    /// Object create calls received, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    async fn respond(&self, timeout: Duration) -> ClientResult {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.behavior {
            FakeBehavior::Succeed => Ok(()),
            FakeBehavior::Reject => Err(ClientError::KubeError(kube::Error::Api(ErrorResponse {
                status: "Failure".to_string(),
                message: "admission webhook denied the request".to_string(),
                reason: "Forbidden".to_string(),
                code: 403,
            }))),
            FakeBehavior::Hang => {
                tokio::time::sleep(timeout).await;
                Err(ClientError::Timeout(timeout))
            }
        }
    }

    async fn create_object(
        &self,
        kind: ObjectKind,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.respond(timeout).await?;
        self.state.lock().unwrap().objects.push(FakeCreate {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
            keys: payload.len(),
        });
        Ok(())
    }
}

#[async_trait]
impl ClusterClient for FakeClusterClient {
    async fn create_namespace(&self, name: &str, timeout: Duration) -> ClientResult {
        self.respond(timeout).await?;
        self.state.lock().unwrap().namespaces.push(name.to_string());
        Ok(())
    }

    async fn create_secret(
        &self,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult {
        self.create_object(ObjectKind::Secret, namespace, name, payload, timeout)
            .await
    }

    async fn create_config_map(
        &self,
        namespace: &str,
        name: &str,
        payload: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> ClientResult {
        self.create_object(ObjectKind::ConfigMap, namespace, name, payload, timeout)
            .await
    }
}

/// Hands out clones of one [`FakeClusterClient`] and counts how many were built
#[derive(Clone)]
pub struct FakeClientFactory {
    client: FakeClusterClient,
    built: Arc<AtomicUsize>,
}

impl FakeClientFactory {
    pub fn new(client: FakeClusterClient) -> Self {
        Self {
            client,
            built: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }
}

impl ClientFactory for FakeClientFactory {
    type Client = FakeClusterClient;

    fn build(&self) -> Result<FakeClusterClient> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(self.client.clone())
    }
}

/// Keeps every report it receives
#[derive(Clone, Default)]
pub struct RecordingSink {
    reports: Arc<Mutex<Vec<ThroughputReport>>>,
}

impl RecordingSink {
    pub fn reports(&self) -> Vec<ThroughputReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl ReportSink for RecordingSink {
    fn report(&mut self, report: &ThroughputReport) {
        self.reports.lock().unwrap().push(*report);
    }
}
