//! HTTP handlers for lesson plan endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::lesson_plan::{
    ExportLessonPlanCommand, ExportLessonPlanError, ExportLessonPlanHandler,
    GenerateLessonPlanCommand, GenerateLessonPlanError, GenerateLessonPlanHandler,
};
use crate::ports::{DocumentExportService, ExportError, ExportFormat, ExportedDocument};

use super::dto::{
    CurriculumResponse, ErrorResponse, ExportLessonPlanRequest, ExportQuery,
    GenerateLessonPlanRequest, LessonPlanResponse,
};

/// Response header carrying export warnings, one per `; `.
pub const EXPORT_WARNINGS_HEADER: &str = "x-export-warnings";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LessonPlanHandlers {
    generate_handler: Arc<GenerateLessonPlanHandler>,
    export_handler: Arc<ExportLessonPlanHandler>,
    exporter: Arc<dyn DocumentExportService>,
}

impl LessonPlanHandlers {
    pub fn new(
        generate_handler: Arc<GenerateLessonPlanHandler>,
        export_handler: Arc<ExportLessonPlanHandler>,
        exporter: Arc<dyn DocumentExportService>,
    ) -> Self {
        Self {
            generate_handler,
            export_handler,
            exporter,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/curriculum - Boards, subjects and form vocabularies
pub async fn get_curriculum() -> Json<CurriculumResponse> {
    Json(CurriculumResponse::catalogue())
}

/// POST /api/lesson-plans - Generate a lesson plan
pub async fn generate_lesson_plan(
    State(handlers): State<LessonPlanHandlers>,
    Json(req): Json<GenerateLessonPlanRequest>,
) -> Response {
    let request = match req.into_lesson_request() {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::validation(&e))).into_response()
        }
    };

    match handlers
        .generate_handler
        .handle(GenerateLessonPlanCommand { request })
        .await
    {
        Ok(result) => {
            let response = LessonPlanResponse {
                markdown: handlers.exporter.to_markdown(&result.plan),
                warnings: LessonPlanResponse::warning_messages(&result.warnings),
                plan: result.plan,
                trace_id: result.trace_id,
                model: result.model,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_generate_error(e),
    }
}

/// POST /api/lesson-plans/export?format= - Download a plan as a document
pub async fn export_lesson_plan(
    State(handlers): State<LessonPlanHandlers>,
    Query(query): Query<ExportQuery>,
    Json(req): Json<ExportLessonPlanRequest>,
) -> Response {
    let format = match query.format.as_deref().map(str::parse::<ExportFormat>) {
        None => ExportFormat::Markdown,
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = ExportLessonPlanCommand {
        plan: req.plan,
        format,
        subject: req.subject,
        topic: req.topic,
    };

    match handlers.export_handler.handle(cmd).await {
        Ok(result) => document_response(result.document),
        Err(e) => handle_export_error(e),
    }
}

fn document_response(document: ExportedDocument) -> Response {
    let mut response = (StatusCode::OK, document.content).into_response();
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&document.content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&content_disposition(&document.filename)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    if !document.warnings.is_empty() {
        let joined = document
            .warnings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        if let Ok(value) = HeaderValue::from_str(&joined) {
            headers.insert(EXPORT_WARNINGS_HEADER, value);
        }
    }

    response
}

/// Builds an attachment disposition with an ASCII fallback name and the
/// RFC 5987 UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if ascii == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii, encoded
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_generate_error(error: GenerateLessonPlanError) -> Response {
    match error {
        GenerateLessonPlanError::Malformed(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::malformed_response(e.to_string())),
        )
            .into_response(),
        GenerateLessonPlanError::ModelReportedError { message } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::model_error(message)),
        )
            .into_response(),
        e if e.is_timeout() => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(ErrorResponse::model_timeout(e.to_string())),
        )
            .into_response(),
        GenerateLessonPlanError::Provider(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::model_error(e.to_string())),
        )
            .into_response(),
    }
}

fn handle_export_error(error: ExportLessonPlanError) -> Response {
    match error {
        ExportLessonPlanError::Export(ExportError::UnsupportedFormat(format)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Unsupported export format: {}",
                format
            ))),
        )
            .into_response(),
        e => {
            tracing::error!(error = %e, "Lesson plan export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response()
        }
    }
}
