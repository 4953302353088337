//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests. The service is
//! stateless, so a test app is just the router with a chosen advice provider.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bmi_insight_backend::{
    config::AppConfig,
    routes,
    services::{AdviceGenerator, DisabledAdviceGenerator},
    state::AppState,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
}

impl TestApp {
    /// Create a test application with the advice provider disabled
    pub fn new() -> Self {
        Self::with_generator(Arc::new(DisabledAdviceGenerator))
    }

    /// Create a test application with a specific advice provider
    pub fn with_generator(generator: Arc<dyn AdviceGenerator>) -> Self {
        let state = AppState::new(AppConfig::default(), generator);
        let app = routes::create_router(state);
        Self { app }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }
}
