//! Prompt rendering for decision requests.

use super::input::DecisionInput;

/// Fixed behavioural contract handed to the model as the system message.
pub const DECISION_SYSTEM_PROMPT: &str = "\
You are a decision-clarifying assistant.
Your job is to help users choose between options.
Be decisive, clear, and practical.
Never hedge without concluding.
Acknowledge uncertainty but still recommend.
Trade-offs must describe the downsides or compromises of the chosen recommendation.
Do NOT repeat the user's constraints verbatim.
The recommendation must be a plain human-readable sentence, not a list, index, or structured artifact.
The confidence_score MUST be an integer between 1 and 10.
Return structured output only.";

/// Placeholder written in the constraints section when there are none.
pub const NO_CONSTRAINTS: &str = "None";

/// Renders the user message for a decision request.
///
/// Options and constraints are written as bullet lists in caller order.
pub fn render_decision_prompt(input: &DecisionInput) -> String {
    let options = bullet_list(input.options());
    let constraints = if input.has_constraints() {
        bullet_list(input.constraints())
    } else {
        NO_CONSTRAINTS.to_string()
    };

    format!(
        "Decision: {}\n\nOptions:\n{}\n\nConstraints:\n{}\n\nUrgency: {}\n",
        input.decision(),
        options,
        constraints,
        input.urgency().as_str(),
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
