//! Decision handlers.

mod run_decision;

pub use run_decision::{DecisionAgent, DecisionError, FINAL_RESULT_TOOL};
