//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by every value object in the
//! DecideForMe domain.

mod errors;

pub use errors::ValidationError;
pub(crate) use errors::{
    require_non_blank, require_non_blank_items, require_text, require_text_items,
};
