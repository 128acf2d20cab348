//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (validation errors)
//! - `decision` - Decision request/recommendation value objects and prompt rendering

pub mod decision;
pub mod foundation;
