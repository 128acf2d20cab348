//! OpenAI-compatible Provider - Implementation of AIProvider for chat-completions APIs.
//!
//! Talks to any endpoint that speaks the OpenAI `/chat/completions` dialect.
//! The default configuration targets OpenRouter.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::default()
//!     .with_api_key(api_key)
//!     .with_model("meta-llama/llama-3.1-8b-instruct")
//!     .with_base_url("https://openrouter.ai/api/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! # Structured output
//!
//! When the request carries a [`ResponseSchema`], the schema is offered as a
//! single function tool and the model is forced to call it. The tool call's
//! `arguments` string becomes the completion content. Models that ignore the
//! tool and answer in `content` are still accepted; a surrounding Markdown code
//! fence is stripped, nothing else is repaired.
//!
//! # Retries
//!
//! Retryable failures (see [`AIError::is_retryable`]) are retried up to
//! `max_retries` times with exponential backoff starting at `retry_backoff`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    ResponseSchema, TokenUsage,
};

/// Default completion endpoint (OpenRouter).
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";

/// Configuration for the OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication. Calls fail with `AuthenticationFailed` without one.
    api_key: Option<Secret<String>>,
    /// Name reported in [`ProviderInfo`].
    pub provider_name: String,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout per attempt.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_backoff: Duration,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider_name: "openrouter".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
            retry_backoff: Duration::from_secs(1),
        }
    }
}

impl OpenAIConfig {
    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the provider name.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL. A trailing slash is ignored.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the initial retry backoff.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }
}

/// OpenAI-compatible chat-completions provider.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the chat-completions format.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(ChatMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            });
        }

        let (tools, tool_choice) = match request.response_schema {
            Some(ref schema) => (
                Some(vec![ToolDefinition::for_schema(schema)]),
                Some(ToolChoice::function(&schema.name)),
            ),
            None => (None, None),
        };

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools,
            tool_choice,
        }
    }

    /// Sends one attempt.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let api_key = self.config.api_key().ok_or(AIError::AuthenticationFailed)?;
        let chat_request = self.to_chat_request(request);

        self.client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.config.timeout.as_secs() as u32,
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = parse_retry_after_header(response.headers());
        let error_body = response.text().await.unwrap_or_default();

        Err(map_status_error(status.as_u16(), &error_body, retry_after))
    }

    /// Parses a response into a completion.
    async fn parse_response(
        &self,
        response: Response,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        extract_completion(chat_response, request, &self.config.model)
    }

    /// One attempt: send, check status, parse.
    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        self.parse_response(response, request).await
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(&request).await {
                Ok(completion) => {
                    tracing::debug!(
                        trace_id = %request.metadata.trace_id,
                        model = %completion.model,
                        prompt_tokens = completion.usage.prompt_tokens,
                        completion_tokens = completion.usage.completion_tokens,
                        "completion received"
                    );
                    return Ok(completion);
                }
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }

                    // Exponential backoff: base, 2*base, 4*base, ...
                    let delay = self.config.retry_backoff * (1u32 << retry_count.min(16));
                    tracing::warn!(
                        trace_id = %request.metadata.trace_id,
                        attempt = retry_count + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "completion attempt failed, retrying"
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.provider_name, &self.config.model).with_functions(true)
    }
}

/// Maps a non-2xx status (or an in-body error code) to an [`AIError`].
fn map_status_error(status: u16, body: &str, retry_after: Option<u32>) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(retry_after.unwrap_or_else(|| parse_retry_after(body))),
        400 => {
            if body.contains("maximum context length") || body.contains("context_length_exceeded")
            {
                AIError::ContextTooLong(body.to_string())
            } else {
                AIError::InvalidRequest(body.to_string())
            }
        }
        402 | 404 | 413 | 422 => AIError::InvalidRequest(format!("status {}: {}", status, body)),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

fn parse_retry_after_header(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok())
}

/// Parses retry-after from an error body, defaulting to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<Value>(error_body) {
        if let Some(s) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + "try again in ".len()..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                if let Ok(secs) = digits.parse::<u32>() {
                    return secs;
                }
            }
        }
    }
    30
}

/// Turns a successful chat response into a completion.
fn extract_completion(
    chat_response: ChatResponse,
    request: &CompletionRequest,
    configured_model: &str,
) -> Result<CompletionResponse, AIError> {
    // Some gateways report upstream failures with a 200 and an error object.
    if let Some(error) = chat_response.error {
        let status = error
            .code
            .as_ref()
            .and_then(|c| c.as_u64().or_else(|| c.as_str().and_then(|s| s.parse().ok())))
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(502);
        return Err(map_status_error(status, &error.message, None));
    }

    let choice = chat_response
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = FinishReason::from_provider(choice.finish_reason.as_deref());
    if finish_reason == FinishReason::ContentFilter {
        return Err(AIError::content_filtered("provider filtered the completion"));
    }

    let content = match request.response_schema {
        Some(ref schema) => structured_content(choice.message, schema)?,
        None => choice.message.content.unwrap_or_default(),
    };

    let usage = chat_response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: chat_response
            .model
            .unwrap_or_else(|| configured_model.to_string()),
        finish_reason,
    })
}

/// Picks the structured reply: the forced tool call, else plain content.
fn structured_content(
    message: ChatResponseMessage,
    schema: &ResponseSchema,
) -> Result<String, AIError> {
    let tool_calls = message.tool_calls.unwrap_or_default();
    let tool_call = tool_calls
        .iter()
        .find(|call| call.function.name.as_deref() == Some(schema.name.as_str()))
        .or_else(|| tool_calls.first());

    if let Some(call) = tool_call {
        return Ok(call.function.arguments.clone());
    }

    match message.content {
        Some(content) if !content.trim().is_empty() => Ok(strip_code_fence(&content).to_string()),
        _ => Err(AIError::parse("Response has neither a tool call nor content")),
    }
}

/// Strips a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ToolDefinition {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDefinition,
}

impl ToolDefinition {
    fn for_schema(schema: &ResponseSchema) -> Self {
        Self {
            kind: "function",
            function: FunctionDefinition {
                name: schema.name.clone(),
                description: schema.description.clone(),
                parameters: schema.schema.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct FunctionDefinition {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolChoiceFunction,
}

impl ToolChoice {
    fn function(name: &str) -> Self {
        Self {
            kind: "function",
            function: ToolChoiceFunction {
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ToolChoiceFunction {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    // Absent and `null` both mean "none".
    choices: Option<Vec<ChatChoice>>,
    usage: Option<ChatUsage>,
    error: Option<ChatErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ChatErrorBody {
    message: String,
    code: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: ToolCallFunction,
}

#[derive(Debug, Deserialize)]
struct ToolCallFunction {
    name: Option<String>,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MessageRole, RequestMetadata};
    use serde_json::json;

    fn schema() -> ResponseSchema {
        ResponseSchema::new(
            "final_result",
            "The final response",
            json!({"type": "object", "properties": {"answer": {"type": "string"}}}),
        )
    }

    fn structured_request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("trace-1"))
            .with_system_prompt("Be decisive")
            .with_message(MessageRole::User, "Decide")
            .with_response_schema(schema())
    }

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::default().with_api_key("test-key")).unwrap()
    }

    fn chat_response(value: Value) -> ChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn config_defaults_target_openrouter() {
        let config = OpenAIConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.model, "meta-llama/llama-3.1-8b-instruct");
        assert_eq!(config.max_retries, 2);
        assert!(!config.has_api_key());
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::default()
            .with_api_key("test-key")
            .with_provider_name("custom")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com/v1/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5)
            .with_retry_backoff(Duration::from_millis(10));

        assert_eq!(config.provider_name, "custom");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_backoff, Duration::from_millis(10));
        assert_eq!(config.api_key(), Some("test-key"));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = OpenAIConfig::default().with_api_key("");
        assert!(!config.has_api_key());
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn config_debug_redacts_api_key() {
        let config = OpenAIConfig::default().with_api_key("sk-or-secret");
        assert!(!format!("{:?}", config).contains("sk-or-secret"));
    }

    #[test]
    fn chat_request_forces_schema_tool() {
        let body = serde_json::to_value(provider().to_chat_request(&structured_request())).unwrap();

        assert_eq!(body["model"], "meta-llama/llama-3.1-8b-instruct");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be decisive");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "final_result");
        assert_eq!(body["tools"][0]["function"]["parameters"], schema().schema);
        assert_eq!(body["tool_choice"]["function"]["name"], "final_result");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn chat_request_without_schema_has_no_tools() {
        let request = CompletionRequest::new(RequestMetadata::new("t"))
            .with_message(MessageRole::User, "Hi")
            .with_max_tokens(50);
        let body = serde_json::to_value(provider().to_chat_request(&request)).unwrap();

        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
        assert_eq!(body["max_tokens"], 50);
    }

    #[test]
    fn extract_prefers_tool_call_arguments() {
        let response = chat_response(json!({
            "model": "meta-llama/llama-3.1-8b-instruct",
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "final_result", "arguments": "{\"answer\":\"yes\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
        }));

        let completion = extract_completion(response, &structured_request(), "fallback").unwrap();
        assert_eq!(completion.content, "{\"answer\":\"yes\"}");
        assert_eq!(completion.finish_reason, FinishReason::ToolCalls);
        assert_eq!(completion.usage.total_tokens, 19);
    }

    #[test]
    fn extract_falls_back_to_fenced_content() {
        let response = chat_response(json!({
            "choices": [{
                "message": {"content": "```json\n{\"answer\":\"yes\"}\n```"},
                "finish_reason": "stop"
            }]
        }));

        let completion = extract_completion(response, &structured_request(), "fallback").unwrap();
        assert_eq!(completion.content, "{\"answer\":\"yes\"}");
        assert_eq!(completion.model, "fallback");
    }

    #[test]
    fn extract_without_tool_call_or_content_is_parse_error() {
        let response = chat_response(json!({
            "choices": [{"message": {"content": "  "}, "finish_reason": "stop"}]
        }));

        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn extract_without_choices_is_parse_error() {
        let response = chat_response(json!({"choices": []}));
        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn extract_maps_content_filter() {
        let response = chat_response(json!({
            "choices": [{"message": {"content": ""}, "finish_reason": "content_filter"}]
        }));
        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert!(matches!(err, AIError::ContentFiltered { .. }));
    }

    #[test]
    fn extract_maps_in_body_error_codes() {
        let response = chat_response(json!({
            "error": {"message": "No auth credentials found", "code": 401}
        }));
        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert_eq!(err, AIError::AuthenticationFailed);

        let response = chat_response(json!({
            "error": {"message": "upstream overloaded", "code": 503}
        }));
        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert!(err.is_retryable());
    }

    #[test]
    fn null_tool_calls_fall_back_to_content() {
        let response = chat_response(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"answer\":\"yes\"}",
                    "tool_calls": null
                },
                "finish_reason": "stop"
            }]
        }));

        let completion = extract_completion(response, &structured_request(), "m").unwrap();
        assert_eq!(completion.content, "{\"answer\":\"yes\"}");
    }

    #[test]
    fn null_choices_is_parse_error() {
        let response = chat_response(json!({"choices": null}));
        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn out_of_range_in_body_code_is_not_truncated() {
        // 65937 would wrap to 401 as a u16.
        let response = chat_response(json!({
            "error": {"message": "weird upstream code", "code": 65937}
        }));
        let err = extract_completion(response, &structured_request(), "m").unwrap_err();
        assert_ne!(err, AIError::AuthenticationFailed);
        assert!(matches!(err, AIError::Unavailable { .. }));
    }

    #[test]
    fn status_errors_are_classified() {
        assert_eq!(map_status_error(401, "", None), AIError::AuthenticationFailed);
        assert_eq!(map_status_error(429, "", Some(7)), AIError::rate_limited(7));
        assert!(matches!(
            map_status_error(400, "context_length_exceeded", None),
            AIError::ContextTooLong(_)
        ));
        assert!(matches!(
            map_status_error(400, "bad", None),
            AIError::InvalidRequest(_)
        ));
        assert!(matches!(
            map_status_error(402, "no credits", None),
            AIError::InvalidRequest(_)
        ));
        assert!(map_status_error(503, "down", None).is_retryable());
    }

    #[test]
    fn strip_code_fence_handles_plain_and_fenced_text() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```\n"), "{\"a\":1}");
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 12 seconds."}}"#;
        assert_eq!(parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(parse_retry_after(error), 30);
    }

    #[test]
    fn provider_info_reports_model() {
        let info = provider().provider_info();
        assert_eq!(info.name, "openrouter");
        assert_eq!(info.model, "meta-llama/llama-3.1-8b-instruct");
        assert!(info.supports_functions);
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_retrying() {
        let provider = OpenAIProvider::new(
            OpenAIConfig::default()
                .with_base_url("http://127.0.0.1:9")
                .with_retry_backoff(Duration::ZERO),
        )
        .unwrap();

        let err = provider.complete(structured_request()).await.unwrap_err();
        assert_eq!(err, AIError::AuthenticationFailed);
    }
}
