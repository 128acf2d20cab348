//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod decision;

pub use decision::{DecisionAgent, DecisionError, FINAL_RESULT_TOOL};
