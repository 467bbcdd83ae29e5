//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the pipeline to external systems:
//! - `ai` - Model providers (Gemini, OpenAI, mock)
//! - `interpreter` - Heading-delimited and fenced-JSON response parsing
//! - `document` - Markdown, PDF and DOCX rendering plus local export storage
//! - `http` - axum routes

pub mod ai;
pub mod document;
pub mod http;
pub mod interpreter;

pub use ai::{provider_from_config, GeminiProvider, MockAIProvider, OpenAIProvider};
pub use document::{LessonPlanExportService, LocalExportStorage};
pub use http::{api_router, LessonPlanHandlers};
pub use interpreter::{
    interpreter_for, DeclaredFormatInterpreters, FencedJsonInterpreter, HeadingDelimitedInterpreter,
};
