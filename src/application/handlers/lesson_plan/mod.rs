//! Lesson plan handlers - generation and export.

mod export_lesson_plan;
mod generate_lesson_plan;

pub use export_lesson_plan::{
    ExportLessonPlanCommand, ExportLessonPlanError, ExportLessonPlanHandler,
    ExportLessonPlanResult,
};
pub use generate_lesson_plan::{
    GenerateLessonPlanCommand, GenerateLessonPlanError, GenerateLessonPlanHandler,
    GenerateLessonPlanResult,
};
