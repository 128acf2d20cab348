//! HTTP handlers for the decision endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::application::handlers::decision::{DecisionAgent, DecisionError};
use crate::domain::decision::DecisionInput;
use crate::ports::{AIError, AIProvider, RequestMetadata};

use super::dto::{ErrorResponse, HealthResponse};

/// Header carrying the caller's trace id; echoed on every decision response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DecisionAppState {
    agent: Arc<DecisionAgent<dyn AIProvider>>,
    request_timeout: Option<Duration>,
}

impl DecisionAppState {
    pub fn new(agent: Arc<DecisionAgent<dyn AIProvider>>) -> Self {
        Self {
            agent,
            request_timeout: None,
        }
    }

    /// Bounds each decision run; an elapsed run answers 408.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Wraps `provider` in an agent with default generation settings.
    pub fn from_provider(provider: Arc<dyn AIProvider>) -> Self {
        Self::new(Arc::new(DecisionAgent::new(provider)))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /decide - Produce a structured recommendation
pub async fn decide(
    State(state): State<DecisionAppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let metadata = request_metadata(&headers);
    let trace_id = metadata.trace_id.clone();

    let response = match payload {
        Ok(Json(body)) => match DecisionInput::from_json(body) {
            Ok(input) => run_bounded(&state, &input, metadata).await,
            Err(e) => {
                tracing::debug!(trace_id = %trace_id, error = %e, "rejected decision request");
                error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
        },
        Err(rejection) => {
            tracing::debug!(trace_id = %trace_id, error = %rejection, "unreadable request body");
            error_response(rejection.status(), rejection.body_text())
        }
    };

    with_request_id(response, &trace_id)
}

async fn run_bounded(
    state: &DecisionAppState,
    input: &DecisionInput,
    metadata: RequestMetadata,
) -> Response {
    let run = state.agent.run_decision_with_metadata(input, metadata);

    let result = match state.request_timeout {
        Some(limit) => match tokio::time::timeout(limit, run).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout_secs = limit.as_secs(), "decision request timed out");
                return error_response(
                    StatusCode::REQUEST_TIMEOUT,
                    format!("request timed out after {}s", limit.as_secs()),
                );
            }
        },
        None => run.await,
    };

    match result {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(e) => handle_decision_error(e),
    }
}

/// GET /health - Liveness plus the configured provider
pub async fn health(State(state): State<DecisionAppState>) -> Response {
    let body = HealthResponse::ok(state.agent.provider_info());
    (StatusCode::OK, Json(body)).into_response()
}

/// Fallback for a known path hit with an unsupported method.
pub fn method_not_allowed(method: Method, path: &str, allow: &'static str) -> Response {
    let mut response = error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} not allowed on {}", method, path),
    );
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    response
}

/// Fallback for unknown paths.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(RequestMetadata::new)
        .unwrap_or_else(RequestMetadata::generate)
}

fn with_request_id(mut response: Response, trace_id: &str) -> Response {
    if let Ok(value) = HeaderValue::from_str(trace_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(detail))).into_response()
}

/// Maps agent failures to HTTP responses.
pub fn handle_decision_error(error: DecisionError) -> Response {
    match &error {
        DecisionError::Provider(AIError::Timeout { .. }) => {
            tracing::warn!(error = %error, "decision provider timed out");
            error_response(StatusCode::GATEWAY_TIMEOUT, error.to_string())
        }
        DecisionError::Provider(_) => {
            tracing::error!(error = %error, "decision provider failed");
            error_response(StatusCode::BAD_GATEWAY, error.to_string())
        }
        DecisionError::InvalidOutput(_) => {
            tracing::error!(error = %error, "model returned an invalid decision");
            error_response(StatusCode::BAD_GATEWAY, error.to_string())
        }
        DecisionError::Internal(_) => {
            tracing::error!(error = %error, "decision request could not be built");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    }
}
