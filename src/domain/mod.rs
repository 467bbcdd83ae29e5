//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors)
//! - `lesson` - Lesson requests, plans, curriculum catalogue and prompts

pub mod foundation;
pub mod lesson;
