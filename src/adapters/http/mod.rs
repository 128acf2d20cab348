//! HTTP adapters - REST API implementation.
//!
//! [`app_router`] assembles the public surface: the decision routes behind
//! request tracing and CORS. Each decision run is bounded by the server
//! request timeout inside the handler, so a timeout still answers `{"detail"}`.

pub mod decision;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use decision::{decision_routes, DecisionAppState, ErrorResponse, HealthResponse};

/// Builds the full application router.
pub fn app_router(state: DecisionAppState, server: &ServerConfig) -> Router {
    decision_routes(state.with_request_timeout(server.request_timeout())).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&server.cors_origins_list())),
    )
}

/// Any origin when `origins` is empty or contains `*`; otherwise exactly the
/// listed origins, with credentials allowed.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(decision::REQUEST_ID_HEADER),
        ])
        .allow_credentials(true)
}
