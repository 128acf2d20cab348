//! Adapters - Implementations of ports and the HTTP surface.
//!
//! - `ai` - completion providers (OpenAI-compatible, mock)
//! - `http` - axum router for the decision API

pub mod ai;
pub mod http;
