//! Integration tests for the decision HTTP endpoints.
//!
//! These tests drive the full router (tracing, timeout and CORS layers
//! included) with a scripted provider:
//! 1. A valid request returns the model's recommendation verbatim
//! 2. Invalid requests are rejected before the provider is called
//! 3. Provider and model failures map to gateway errors with a `detail` body

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use decide_for_me::adapters::ai::{MockAIProvider, MockError};
use decide_for_me::adapters::http::{app_router, DecisionAppState};
use decide_for_me::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(provider: &MockAIProvider) -> Router {
    app_router(
        DecisionAppState::from_provider(Arc::new(provider.clone())),
        &ServerConfig::default(),
    )
}

fn database_request() -> Value {
    json!({
        "decision": "Which database to use",
        "options": ["Postgres", "MongoDB"],
        "constraints": ["must support strong consistency"],
        "urgency": "high"
    })
}

fn postgres_reply() -> Value {
    json!({
        "recommendation": "Use Postgres for this workload.",
        "reasoning": "Strong consistency is a hard requirement and Postgres provides it natively.",
        "tradeoffs": ["Requires more upfront schema design"],
        "fallback_plan": "Re-evaluate with MongoDB if write throughput becomes the bottleneck",
        "confidence_score": 8
    })
}

async fn post_decide(router: Router, body: &Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post("/decide")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn decide_returns_model_recommendation() {
    let provider = MockAIProvider::new().with_json_response(&postgres_reply());

    let (status, body) = post_decide(app(&provider), &database_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, postgres_reply());
    assert_eq!(provider.call_count(), 1);

    let prompt = &provider.get_calls()[0].messages[0].content;
    assert!(prompt.contains("- Postgres\n- MongoDB"));
    assert!(prompt.contains("- must support strong consistency"));
    assert!(prompt.contains("Urgency: high"));
}

#[tokio::test]
async fn decide_without_constraints_renders_none() {
    let provider = MockAIProvider::new().with_json_response(&postgres_reply());
    let mut request = database_request();
    request["constraints"] = Value::Null;

    let (status, _) = post_decide(app(&provider), &request).await;

    assert_eq!(status, StatusCode::OK);
    let prompt = &provider.get_calls()[0].messages[0].content;
    assert!(prompt.contains("Constraints:\nNone\n"));
}

#[tokio::test]
async fn decide_echoes_request_id() {
    let provider = MockAIProvider::new().with_json_response(&postgres_reply());

    let response = app(&provider)
        .oneshot(
            Request::post("/decide")
                .header("content-type", "application/json")
                .header("x-request-id", "req-123")
                .body(Body::from(database_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-123");
    assert_eq!(provider.get_calls()[0].metadata.trace_id, "req-123");
}

// =============================================================================
// Request validation
// =============================================================================

#[tokio::test]
async fn empty_options_are_rejected_without_calling_provider() {
    let provider = MockAIProvider::new();
    let mut request = database_request();
    request["options"] = json!([]);

    let (status, body) = post_decide(app(&provider), &request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("options"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn missing_urgency_is_rejected() {
    let provider = MockAIProvider::new();
    let mut request = database_request();
    request.as_object_mut().unwrap().remove("urgency");

    let (status, body) = post_decide(app(&provider), &request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("urgency"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn unknown_urgency_is_rejected() {
    let provider = MockAIProvider::new();
    let mut request = database_request();
    request["urgency"] = json!("urgent");

    let (status, body) = post_decide(app(&provider), &request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn blank_decision_is_rejected() {
    let provider = MockAIProvider::new();
    let mut request = database_request();
    request["decision"] = json!("   ");

    let (status, body) = post_decide(app(&provider), &request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("decision"));
}

#[tokio::test]
async fn wrong_method_answers_with_detail() {
    let provider = MockAIProvider::new();

    let response = app(&provider)
        .oneshot(Request::get("/decide").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].as_str().unwrap().contains("GET"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn padded_model_reply_is_returned_verbatim() {
    let mut reply = postgres_reply();
    reply["recommendation"] = json!("  Use Postgres for this workload.\n");
    let provider = MockAIProvider::new().with_json_response(&reply);

    let (status, body) = post_decide(app(&provider), &database_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, reply);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let provider = MockAIProvider::new();

    let response = app(&provider)
        .oneshot(
            Request::post("/decide")
                .header("content-type", "application/json")
                .body(Body::from("{\"decision\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].is_string());
}

// =============================================================================
// Upstream failures
// =============================================================================

#[tokio::test]
async fn provider_failure_is_bad_gateway() {
    let provider = MockAIProvider::new().with_error(MockError::Unavailable {
        message: "upstream 503".to_string(),
    });

    let (status, body) = post_decide(app(&provider), &database_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"].as_str().unwrap().contains("upstream 503"));
}

#[tokio::test]
async fn missing_credentials_is_bad_gateway() {
    let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);

    let (status, body) = post_decide(app(&provider), &database_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("authentication failed"));
}

#[tokio::test]
async fn provider_timeout_is_gateway_timeout() {
    let provider = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 60 });

    let (status, _) = post_decide(app(&provider), &database_request()).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn invalid_model_reply_is_bad_gateway() {
    let mut reply = postgres_reply();
    reply["confidence_score"] = json!(42);
    let provider = MockAIProvider::new().with_json_response(&reply);

    let (status, body) = post_decide(app(&provider), &database_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["detail"].as_str().unwrap().contains("confidence_score"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn request_timeout_bounds_slow_provider() {
    let provider = MockAIProvider::new()
        .with_json_response(&postgres_reply())
        .with_delay(Duration::from_secs(5));
    let server = ServerConfig {
        request_timeout_secs: 1,
        ..Default::default()
    };
    let router = app_router(
        DecisionAppState::from_provider(Arc::new(provider.clone())),
        &server,
    );

    let response = router
        .oneshot(
            Request::post("/decide")
                .header("content-type", "application/json")
                .header("x-request-id", "slow-1")
                .body(Body::from(database_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.headers()["x-request-id"], "slow-1");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"detail": "request timed out after 1s"}));
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_provider_and_model() {
    let provider = MockAIProvider::new();

    let response = app(&provider)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        json!({"status": "ok", "provider": "mock", "model": "mock-model-1"})
    );
}
