//! Integration tests for the advice endpoint and the Gemini client
//!
//! The endpoint tests use stub generators; the client tests run against a
//! wiremock server standing in for the Generative Language API.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bmi_insight_backend::config::AdviceConfig;
use bmi_insight_backend::services::{
    AdviceError, AdviceGenerator, GeminiClient, FALLBACK_ADVICE,
};
use bmi_insight_shared::health_metrics::{ActivityLevel, BmiCategory, Gender};
use bmi_insight_shared::types::AdviceRequest;

struct StaticGenerator(&'static str);

#[async_trait]
impl AdviceGenerator for StaticGenerator {
    async fn generate(&self, _context: &AdviceRequest) -> Result<String, AdviceError> {
        Ok(self.0.to_string())
    }
}

fn advice_body() -> Value {
    json!({
        "bmi": 24.2,
        "bmi_category": "normal",
        "health_conditions": ["hypertension"],
        "dietary_restrictions": [],
        "allergies": ["peanuts"],
        "age": 25,
        "gender": "male",
        "activity_level": "moderately_active"
    })
}

fn advice_context() -> AdviceRequest {
    AdviceRequest {
        bmi: 24.2,
        bmi_category: BmiCategory::Normal,
        health_conditions: vec!["hypertension".to_string()],
        dietary_restrictions: vec![],
        allergies: vec!["peanuts".to_string()],
        age: 25,
        gender: Gender::Male,
        activity_level: ActivityLevel::ModeratelyActive,
    }
}

fn client_config(base_url: String) -> AdviceConfig {
    AdviceConfig {
        enabled: true,
        base_url,
        model: "gemini-1.5-flash".to_string(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    }
}

// ============================================================================
// Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_advice_endpoint_returns_generated_text() {
    let app = common::TestApp::with_generator(Arc::new(StaticGenerator("Eat your greens.")));

    let (status, response) = app
        .post("/api/v1/advice", &advice_body().to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["advice"], "Eat your greens.");
    assert_eq!(parsed["source"], "generated");
}

#[tokio::test]
async fn test_advice_endpoint_falls_back_when_provider_fails() {
    // Default TestApp uses the disabled provider, which always fails
    let app = common::TestApp::new();

    let (status, response) = app
        .post("/api/v1/advice", &advice_body().to_string())
        .await;

    // Provider failure is swallowed, never an HTTP error
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["advice"], FALLBACK_ADVICE);
    assert_eq!(parsed["source"], "fallback");
}

#[tokio::test]
async fn test_advice_endpoint_rejects_invalid_age() {
    let app = common::TestApp::new();

    let mut body = advice_body();
    body["age"] = json!(0);

    let (status, response) = app.post("/api/v1/advice", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let parsed: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["error"]["code"], "VALIDATION_ERROR");
}

// ============================================================================
// Gemini Client Tests
// ============================================================================

#[tokio::test]
async fn test_gemini_client_parses_generated_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "system_instruction": {
                "parts": [{
                    "text": "You are a nutritionist providing personalized health advice and food recommendations."
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "## Analysis\nYou are doing fine."}]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&client_config(server.uri())).unwrap();
    let advice = client.generate(&advice_context()).await.unwrap();

    assert_eq!(advice, "## Analysis\nYou are doing fine.");
}

#[tokio::test]
async fn test_gemini_client_prompt_carries_context() {
    let server = MockServer::start().await;

    // The user content must carry the BMI, category, and free-text lists
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "ok"}]}
            }]
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&client_config(server.uri())).unwrap();
    client.generate(&advice_context()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(body.contains("BMI: 24.2 (Normal Weight)"));
    assert!(body.contains("hypertension"));
    assert!(body.contains("peanuts"));
    assert!(body.contains("Dietary Restrictions: None"));
}

#[tokio::test]
async fn test_gemini_client_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"message": "Resource has been exhausted"}
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&client_config(server.uri())).unwrap();
    let err = client.generate(&advice_context()).await.unwrap_err();

    match err {
        AdviceError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("exhausted"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_gemini_client_rejects_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": []
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&client_config(server.uri())).unwrap();
    let err = client.generate(&advice_context()).await.unwrap_err();

    assert!(matches!(err, AdviceError::Malformed(_)));
}

#[tokio::test]
async fn test_advice_endpoint_with_failing_upstream_serves_fallback() {
    // Full path: real client, upstream down, endpoint still answers 200
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&client_config(server.uri())).unwrap();
    let app = common::TestApp::with_generator(Arc::new(client));

    let (status, response) = app
        .post("/api/v1/advice", &advice_body().to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(parsed["source"], "fallback");
    assert_eq!(parsed["advice"], FALLBACK_ADVICE);
}
