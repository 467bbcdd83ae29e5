//! Application handlers.
//!
//! Command handlers that orchestrate the lesson plan pipeline.

pub mod lesson_plan;

pub use lesson_plan::{
    ExportLessonPlanCommand, ExportLessonPlanError, ExportLessonPlanHandler,
    ExportLessonPlanResult, GenerateLessonPlanCommand, GenerateLessonPlanError,
    GenerateLessonPlanHandler, GenerateLessonPlanResult,
};
