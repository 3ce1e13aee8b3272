//! In-process API driver: the full router over `MemoryStore` and `MockAI`,
//! exercised with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use mindful_core::kernel::{BaseAI, MemoryStore, MockAI, TestDependencies};
use mindful_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// App backed by the default `MockAI`.
    pub fn new() -> Self {
        Self::with_ai(Arc::new(MockAI::new()))
    }

    /// App backed by the given AI double.
    pub fn with_ai(ai: Arc<dyn BaseAI>) -> Self {
        let deps = TestDependencies::new().ai(ai);
        let store = deps.store.clone();
        let router = build_app(deps.into_server_deps(), &["*".to_string()]);
        Self { router, store }
    }

    /// App whose store rejects every write; reads still hit `store`.
    pub fn read_only() -> Self {
        let deps = TestDependencies::new();
        let store = deps.store.clone();
        let router = build_app(deps.into_read_only_deps(), &["*".to_string()]);
        Self { router, store }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }
}

/// True when `name` looks like `Prefix_NNN` with a known prefix.
pub fn is_pseudonym(name: &str) -> bool {
    const PREFIXES: [&str; 5] = ["Anonymous", "Student", "Mindful", "Helper", "Seeker"];
    match name.split_once('_') {
        Some((prefix, digits)) => {
            PREFIXES.contains(&prefix)
                && digits.len() == 3
                && digits
                    .parse::<u16>()
                    .is_ok_and(|n| (100..=999).contains(&n))
        }
        None => false,
    }
}
