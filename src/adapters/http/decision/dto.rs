//! DTOs for the decision endpoints.
//!
//! The request and success bodies are the domain types themselves
//! (`DecisionInput` / `DecisionOutput`); only the envelopes live here.

use serde::{Deserialize, Serialize};

use crate::ports::ProviderInfo;

/// Error body for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub model: String,
}

impl HealthResponse {
    pub fn ok(info: ProviderInfo) -> Self {
        Self {
            status: "ok".to_string(),
            provider: info.name,
            model: info.model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_serializes_detail_only() {
        let body = serde_json::to_value(ErrorResponse::new("bad input")).unwrap();
        assert_eq!(body, json!({"detail": "bad input"}));
    }

    #[test]
    fn health_response_reports_provider() {
        let body = HealthResponse::ok(ProviderInfo::new("openrouter", "meta-llama/llama-3.1-8b-instruct"));
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({
                "status": "ok",
                "provider": "openrouter",
                "model": "meta-llama/llama-3.1-8b-instruct"
            })
        );
    }
}
