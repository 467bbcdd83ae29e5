//! PLANIT - Board-aligned lesson plan generation.
//!
//! An educator's request is rendered into a prompt, answered by a language
//! model, interpreted into a structured `LessonPlan` and exported as
//! Markdown, PDF or DOCX.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
