//! DecideForMe - Structured decision recommendations from a language model
//!
//! A caller describes a choice (the decision, candidate options, optional
//! constraints, urgency) and receives a validated recommendation: one
//! sentence, reasoning, trade-offs, a fallback plan and a 1-10 confidence score.
//!
//! Layout follows a hexagonal split:
//! - `domain` - request/response value objects and prompt rendering
//! - `ports` - the completion provider contract
//! - `adapters` - the OpenAI-compatible provider, a mock, and the HTTP router
//! - `application` - the decision agent tying them together
//! - `config` - environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
