//! Recommendation value objects returned to the caller.

use once_cell::sync::Lazy;
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, NumberValidation, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::{require_non_blank, require_non_blank_items, ValidationError};

/// Model confidence in its recommendation: an integer from 1 to 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ConfidenceScore(u8);

impl ConfidenceScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a score, returning error if out of range.
    pub fn try_from_i64(value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ValidationError::out_of_range(
                "confidence_score",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ConfidenceScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from_i64(value)
    }
}

impl From<ConfidenceScore> for u8 {
    fn from(score: ConfidenceScore) -> Self {
        score.0
    }
}

impl fmt::Display for ConfidenceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

impl JsonSchema for ConfidenceScore {
    fn schema_name() -> String {
        "ConfidenceScore".to_string()
    }

    fn is_referenceable() -> bool {
        false
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::Integer.into()),
            number: Some(Box::new(NumberValidation {
                minimum: Some(f64::from(Self::MIN)),
                maximum: Some(f64::from(Self::MAX)),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

/// A validated recommendation.
///
/// The model's reply is untrusted input: it only becomes a `DecisionOutput`
/// after the shape, the confidence range and the prose checks pass.
/// Unknown fields are rejected rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DecisionOutputFields")]
pub struct DecisionOutput {
    recommendation: String,
    reasoning: String,
    tradeoffs: Vec<String>,
    fallback_plan: String,
    confidence_score: ConfidenceScore,
}

/// Structured output the model must produce.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename = "DecisionOutput", deny_unknown_fields)]
struct DecisionOutputFields {
    /// One plain human-readable sentence naming the recommended option.
    /// Never a list, an index or a structured fragment.
    recommendation: String,
    /// Why this option wins, acknowledging uncertainty where it exists.
    reasoning: String,
    /// Downsides or compromises of the recommended option itself.
    tradeoffs: Vec<String>,
    /// What to do if the recommendation does not work out.
    fallback_plan: String,
    /// Integer confidence from 1 (guess) to 10 (certain).
    confidence_score: ConfidenceScore,
}

impl TryFrom<DecisionOutputFields> for DecisionOutput {
    type Error = ValidationError;

    fn try_from(fields: DecisionOutputFields) -> Result<Self, Self::Error> {
        DecisionOutput::new(
            fields.recommendation,
            fields.reasoning,
            fields.tradeoffs,
            fields.fallback_plan,
            fields.confidence_score,
        )
    }
}

static DECISION_OUTPUT_SCHEMA: Lazy<Result<Value, String>> = Lazy::new(|| {
    serde_json::to_value(schemars::schema_for!(DecisionOutputFields)).map_err(|e| e.to_string())
});

impl DecisionOutput {
    /// Creates a validated recommendation.
    ///
    /// Text is kept exactly as given; blank fields are rejected, never rewritten.
    pub fn new(
        recommendation: impl Into<String>,
        reasoning: impl Into<String>,
        tradeoffs: Vec<String>,
        fallback_plan: impl Into<String>,
        confidence_score: ConfidenceScore,
    ) -> Result<Self, ValidationError> {
        let recommendation = require_non_blank("recommendation", recommendation.into())?;
        require_sentence("recommendation", &recommendation)?;

        Ok(Self {
            recommendation,
            reasoning: require_non_blank("reasoning", reasoning.into())?,
            tradeoffs: require_non_blank_items("tradeoffs", tradeoffs)?,
            fallback_plan: require_non_blank("fallback_plan", fallback_plan.into())?,
            confidence_score,
        })
    }

    /// Validates an already-parsed reply object.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        let fields: DecisionOutputFields = serde_json::from_value(value)
            .map_err(|e| ValidationError::invalid_format("reply", e.to_string()))?;
        Self::try_from(fields)
    }

    /// Validates raw reply text, which must be a single JSON object.
    pub fn from_json_str(text: &str) -> Result<Self, ValidationError> {
        let fields: DecisionOutputFields = serde_json::from_str(text)
            .map_err(|e| ValidationError::invalid_format("reply", e.to_string()))?;
        Self::try_from(fields)
    }

    /// JSON Schema of the reply the model must produce.
    pub fn json_schema() -> Result<&'static Value, ValidationError> {
        DECISION_OUTPUT_SCHEMA
            .as_ref()
            .map_err(|e| ValidationError::invalid_format("schema", e.clone()))
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn tradeoffs(&self) -> &[String] {
        &self.tradeoffs
    }

    pub fn fallback_plan(&self) -> &str {
        &self.fallback_plan
    }

    pub fn confidence_score(&self) -> ConfidenceScore {
        self.confidence_score
    }
}

/// Rejects bare indexes ("2"), structured fragments and multi-line lists.
fn require_sentence(field: &str, text: &str) -> Result<(), ValidationError> {
    let text = text.trim();
    if !text.chars().any(char::is_alphabetic) {
        return Err(ValidationError::invalid_format(
            field,
            "must be a sentence, not an index",
        ));
    }
    if text.starts_with('[') || text.starts_with('{') {
        return Err(ValidationError::invalid_format(
            field,
            "must be a sentence, not a structured fragment",
        ));
    }
    if text.lines().filter(|line| !line.trim().is_empty()).count() > 1 {
        return Err(ValidationError::invalid_format(
            field,
            "must be a single sentence, not a list",
        ));
    }
    Ok(())
}
