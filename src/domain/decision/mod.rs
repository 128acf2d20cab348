//! Decision module - request and recommendation value objects.
//!
//! - [`DecisionInput`] is what a caller asks: the decision, the options, optional
//!   constraints and an [`Urgency`].
//! - [`DecisionOutput`] is what the model must answer, checked field by field
//!   before anyone sees it.
//! - [`render_decision_prompt`] and [`DECISION_SYSTEM_PROMPT`] turn the former
//!   into the messages sent to the completion provider.

mod input;
mod output;
mod prompt;

pub use input::{DecisionInput, Urgency, MIN_OPTIONS};
pub use output::{ConfidenceScore, DecisionOutput};
pub use prompt::{render_decision_prompt, DECISION_SYSTEM_PROMPT, NO_CONSTRAINTS};
