//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by the lesson domain.

mod errors;

pub use errors::ValidationError;
