//! DecisionAgent - turns a validated decision request into a validated recommendation.
//!
//! One logical provider call per run. Transport retries belong to the provider
//! adapter; a reply that fails validation is reported, never repaired or re-asked.

use std::sync::Arc;

use crate::domain::decision::{
    render_decision_prompt, DecisionInput, DecisionOutput, DECISION_SYSTEM_PROMPT,
};
use crate::domain::foundation::ValidationError;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FinishReason, MessageRole, ProviderInfo,
    RequestMetadata, ResponseSchema,
};

/// Tool name the structured reply is requested under.
pub const FINAL_RESULT_TOOL: &str = "final_result";

const FINAL_RESULT_DESCRIPTION: &str = "The final decision recommendation";

/// Error type for running a decision.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    /// The completion call failed after the provider's retries.
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),

    /// The model answered, but not with a valid recommendation.
    #[error("invalid model output: {0}")]
    InvalidOutput(ValidationError),

    /// The request to the provider could not be assembled.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Runs decision requests against a completion provider.
///
/// Built once and shared; holds no per-request state.
pub struct DecisionAgent<P: ?Sized + AIProvider> {
    provider: Arc<P>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl<P: ?Sized + AIProvider> DecisionAgent<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Caps the number of generated tokens per call.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature per call.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Provider name and model, as reported by the provider.
    pub fn provider_info(&self) -> ProviderInfo {
        self.provider.provider_info()
    }

    /// Runs a decision with a freshly generated trace id.
    pub async fn run_decision(&self, input: &DecisionInput) -> Result<DecisionOutput, DecisionError> {
        self.run_decision_with_metadata(input, RequestMetadata::generate())
            .await
    }

    /// Runs a decision under the caller's trace id.
    #[tracing::instrument(
        name = "run_decision",
        skip(self, input, metadata),
        fields(trace_id = %metadata.trace_id, urgency = %input.urgency(), options = input.options().len())
    )]
    pub async fn run_decision_with_metadata(
        &self,
        input: &DecisionInput,
        metadata: RequestMetadata,
    ) -> Result<DecisionOutput, DecisionError> {
        let request = self.build_request(input, metadata)?;

        let response = self.provider.complete(request).await.map_err(|e| {
            tracing::warn!(error = %e, "decision completion failed");
            DecisionError::Provider(e)
        })?;

        if response.finish_reason == FinishReason::ContentFilter {
            return Err(AIError::content_filtered("completion was filtered").into());
        }

        let output = DecisionOutput::from_json_str(&response.content).map_err(|e| {
            tracing::warn!(
                error = %e,
                finish_reason = ?response.finish_reason,
                "model reply failed validation"
            );
            DecisionError::InvalidOutput(e)
        })?;

        tracing::info!(
            model = %response.model,
            confidence = output.confidence_score().value(),
            total_tokens = response.usage.total_tokens,
            "decision produced"
        );

        Ok(output)
    }

    fn build_request(
        &self,
        input: &DecisionInput,
        metadata: RequestMetadata,
    ) -> Result<CompletionRequest, DecisionError> {
        let schema = DecisionOutput::json_schema()
            .map_err(|e| DecisionError::Internal(e.to_string()))?;

        let mut request = CompletionRequest::new(metadata)
            .with_system_prompt(DECISION_SYSTEM_PROMPT)
            .with_message(MessageRole::User, render_decision_prompt(input))
            .with_response_schema(ResponseSchema::new(
                FINAL_RESULT_TOOL,
                FINAL_RESULT_DESCRIPTION,
                schema.clone(),
            ));

        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        Ok(request)
    }
}
