//! HTTP adapters - REST API implementations.
//!
//! `api_router` assembles the full application:
//! - `GET /health`
//! - `GET /api/curriculum`
//! - `POST /api/lesson-plans`
//! - `POST /api/lesson-plans/export?format=md|pdf|docx`

pub mod lesson_plan;

pub use lesson_plan::{curriculum_routes, lesson_plan_routes, LessonPlanHandlers};

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: String,
    pub version: &'static str,
}

/// Builds the application router with tracing and CORS layers.
///
/// An empty `cors_origins` list allows any origin.
pub fn api_router(app_name: &str, handlers: LessonPlanHandlers, cors_origins: &[String]) -> Router {
    let health = HealthResponse {
        status: "ok",
        app: app_name.to_string(),
        version: env!("CARGO_PKG_VERSION"),
    };

    Router::new()
        .route(
            "/health",
            get(move || {
                let health = health.clone();
                async move { Json(health) }
            }),
        )
        .nest("/api/curriculum", curriculum_routes())
        .nest("/api/lesson-plans", lesson_plan_routes(handlers))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(allowed)
    }
}
