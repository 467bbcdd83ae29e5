//! HTTP routes for lesson plan endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    export_lesson_plan, generate_lesson_plan, get_curriculum, LessonPlanHandlers,
};

/// Creates the lesson plan router, mounted under `/api/lesson-plans`.
pub fn lesson_plan_routes(handlers: LessonPlanHandlers) -> Router {
    Router::new()
        .route("/", post(generate_lesson_plan))
        .route("/export", post(export_lesson_plan))
        .with_state(handlers)
}

/// Creates the curriculum router, mounted under `/api/curriculum`.
pub fn curriculum_routes() -> Router {
    Router::new().route("/", get(get_curriculum))
}
