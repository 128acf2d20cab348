//! Decision HTTP adapter - `POST /decide` and `GET /health`.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse};
pub use handlers::{
    decide, handle_decision_error, health, method_not_allowed, not_found, DecisionAppState,
    REQUEST_ID_HEADER,
};
pub use routes::decision_routes;
