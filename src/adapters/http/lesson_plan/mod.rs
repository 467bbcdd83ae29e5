//! HTTP adapter for lesson plan and curriculum endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BoardResponse, CurriculumResponse, ErrorResponse, ExportLessonPlanRequest, ExportQuery,
    GenerateLessonPlanRequest, LessonPlanResponse, ListField,
};
pub use handlers::{content_disposition, LessonPlanHandlers, EXPORT_WARNINGS_HEADER};
pub use routes::{curriculum_routes, lesson_plan_routes};
