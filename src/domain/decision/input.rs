//! Decision request value objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{require_text, require_text_items, ValidationError};

/// Smallest number of options that still makes a choice.
pub const MIN_OPTIONS: usize = 2;

/// How soon the caller needs to act on the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Returns the wire value, also used verbatim in the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(ValidationError::invalid_format(
                "urgency",
                format!("expected one of low, medium, high, got '{}'", other),
            )),
        }
    }
}

/// A validated decision request.
///
/// Every instance has a non-blank `decision`, at least [`MIN_OPTIONS`]
/// non-blank options in caller order, and non-blank constraints (possibly
/// none). Deserialization runs the same checks as [`DecisionInput::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DecisionInputFields")]
pub struct DecisionInput {
    decision: String,
    options: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    constraints: Vec<String>,
    urgency: Urgency,
}

/// Wire shape before semantic validation.
#[derive(Debug, Deserialize)]
struct DecisionInputFields {
    decision: String,
    options: Vec<String>,
    #[serde(default)]
    constraints: Option<Vec<String>>,
    urgency: Urgency,
}

impl TryFrom<DecisionInputFields> for DecisionInput {
    type Error = ValidationError;

    fn try_from(fields: DecisionInputFields) -> Result<Self, Self::Error> {
        DecisionInput::new(
            fields.decision,
            fields.options,
            fields.constraints,
            fields.urgency,
        )
    }
}

impl DecisionInput {
    /// Creates a validated decision request.
    ///
    /// Text is trimmed. `None` and an empty list both mean "no constraints".
    pub fn new(
        decision: impl Into<String>,
        options: Vec<String>,
        constraints: Option<Vec<String>>,
        urgency: Urgency,
    ) -> Result<Self, ValidationError> {
        let decision = require_text("decision", decision.into())?;

        if options.len() < MIN_OPTIONS {
            return Err(ValidationError::too_few_items(
                "options",
                MIN_OPTIONS,
                options.len(),
            ));
        }
        let options = require_text_items("options", options)?;
        let constraints = require_text_items("constraints", constraints.unwrap_or_default())?;

        Ok(Self {
            decision,
            options,
            constraints,
            urgency,
        })
    }

    /// Builds a request from an already-parsed JSON body.
    ///
    /// Missing fields, wrong types and unknown urgency values are reported
    /// as [`ValidationError::InvalidFormat`] on the `body` field.
    pub fn from_json(value: Value) -> Result<Self, ValidationError> {
        let fields: DecisionInputFields = serde_json::from_value(value)
            .map_err(|e| ValidationError::invalid_format("body", e.to_string()))?;
        Self::try_from(fields)
    }

    pub fn decision(&self) -> &str {
        &self.decision
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    pub fn has_constraints(&self) -> bool {
        !self.constraints.is_empty()
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }
}
