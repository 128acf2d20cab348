//! HTTP routes for the decision endpoints.

use axum::{
    http::{Method, Uri},
    routing::{get, post},
    Router,
};

use super::handlers::{decide, health, method_not_allowed, not_found, DecisionAppState};

/// Creates the decision router with all endpoints.
///
/// Unknown paths and unsupported methods answer with the same `{"detail"}`
/// body as every other error.
pub fn decision_routes(state: DecisionAppState) -> Router {
    Router::new()
        .route(
            "/decide",
            post(decide).fallback(|method: Method, uri: Uri| async move {
                method_not_allowed(method, uri.path(), "POST")
            }),
        )
        .route(
            "/health",
            get(health).fallback(|method: Method, uri: Uri| async move {
                method_not_allowed(method, uri.path(), "GET,HEAD")
            }),
        )
        .fallback(not_found)
        .with_state(state)
}
