//! Lesson module - request, plan and prompt vocabulary.
//!
//! - `curriculum` - boards, subjects and the closed pedagogy enumerations
//! - `request` - the validated `LessonRequest` and its builder
//! - `plan` - the `LessonPlan` aggregate and the shared section order
//! - `prompt` - rendering a request into a model prompt

mod curriculum;
mod plan;
mod prompt;
mod request;

pub use curriculum::{
    is_known_board, subjects_for, BloomLevel, LessonDuration, Pedagogy, BOARDS, DEFAULT_BOARD,
};
pub use plan::{LessonPlan, SectionContent, SectionName, SECTION_ORDER, STRUCTURED_SECTIONS};
pub use prompt::{PromptRenderer, RenderedPrompt, SYSTEM_INSTRUCTION};
pub use request::{
    parse_constraints, parse_objectives, LessonRequest, LessonRequestBuilder, ResponseFormat,
    MAX_GRADE, MIN_GRADE,
};
