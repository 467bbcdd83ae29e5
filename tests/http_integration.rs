//! Integration tests for the HTTP API.
//!
//! The full router is driven with `tower::ServiceExt::oneshot` against a
//! mock model provider, covering routing, DTO handling and status mapping.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use planit::adapters::ai::{MockAIProvider, MockError};
use planit::adapters::document::{LessonPlanExportService, LocalExportStorage};
use planit::adapters::http::{api_router, LessonPlanHandlers};
use planit::adapters::interpreter::DeclaredFormatInterpreters;
use planit::application::{ExportLessonPlanHandler, GenerateLessonPlanHandler};
use planit::ports::{DocumentExportService, FileNaming};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(provider: MockAIProvider, export_handler: ExportLessonPlanHandler) -> Router {
    let exporter: Arc<dyn DocumentExportService> = Arc::new(LessonPlanExportService::new());
    let handlers = LessonPlanHandlers::new(
        Arc::new(GenerateLessonPlanHandler::new(
            Arc::new(provider),
            Arc::new(DeclaredFormatInterpreters),
        )),
        Arc::new(export_handler),
        exporter,
    );
    api_router("PLANIT", handlers, &[])
}

fn app(provider: MockAIProvider) -> Router {
    let exporter = Arc::new(LessonPlanExportService::new());
    app_with(
        provider,
        ExportLessonPlanHandler::new(exporter).with_naming(FileNaming::Topic),
    )
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn lesson_request(format: &str) -> Value {
    json!({
        "board": "CBSE",
        "grade": 6,
        "subject": "Science",
        "topic": "Water Cycle",
        "duration": "40 min",
        "learning_objectives": "describe evaporation, draw the cycle",
        "response_format": format
    })
}

fn export_body() -> Value {
    json!({
        "plan": {
            "title": "Water Cycle",
            "sections": {"Assessment": "Exit ticket", "Materials": ["Beaker", "Kettle"]}
        },
        "subject": "Science",
        "topic": "Water Cycle"
    })
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Health and catalogue
// =============================================================================

#[tokio::test]
async fn health_reports_app_name() {
    let response = app(MockAIProvider::new())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["app"], "PLANIT");
}

#[tokio::test]
async fn curriculum_lists_boards() {
    let response = app(MockAIProvider::new())
        .oneshot(Request::get("/api/curriculum").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["boards"][0]["name"], "CBSE");
    assert_eq!(body["bloom_levels"].as_array().unwrap().len(), 6);
}

// =============================================================================
// Generation
// =============================================================================

#[tokio::test]
async fn generate_returns_plan_and_markdown() {
    let provider = MockAIProvider::new().with_response(
        "```json\n{\"title\":\"Water Cycle\",\"sections\":{\"Assessment\":\"Quiz\",\"Materials\":[\"a\",\"b\"]}}\n```",
    );

    let response = app(provider.clone())
        .oneshot(post_json("/api/lesson-plans", lesson_request("fenced_json")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["plan"]["title"], "Water Cycle");
    assert_eq!(body["plan"]["sections"]["Materials"], json!(["a", "b"]));
    assert_eq!(
        body["markdown"],
        "# Water Cycle\n\n## Materials\n\n- a\n- b\n\n## Assessment\n\nQuiz"
    );
    assert_eq!(body["warnings"], json!([]));

    let prompt = provider.get_calls()[0].last_user_message().unwrap().to_string();
    assert!(prompt.contains("describe evaporation"));
}

#[tokio::test]
async fn heading_answer_reports_missing_sections() {
    let provider = MockAIProvider::new().with_response("### Introduction\nHook");

    let response = app(provider)
        .oneshot(post_json("/api/lesson-plans", lesson_request("heading_delimited")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["plan"]["title"], "Water Cycle Lesson Plan");
    assert_eq!(
        body["warnings"],
        json!(["Section not found: Main Activity", "Section not found: Conclusion"])
    );
}

#[tokio::test]
async fn invalid_request_is_400_without_model_call() {
    let provider = MockAIProvider::new();
    let mut request = lesson_request("fenced_json");
    request["grade"] = json!(13);

    let response = app(provider.clone())
        .oneshot(post_json("/api/lesson-plans", request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "VALIDATION_FAILED");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn malformed_answer_is_422() {
    let provider = MockAIProvider::new().with_response("I cannot produce JSON today.");

    let response = app(provider)
        .oneshot(post_json("/api/lesson-plans", lesson_request("fenced_json")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["code"], "MALFORMED_RESPONSE");
}

#[tokio::test]
async fn reported_error_is_502() {
    let provider = MockAIProvider::new().with_response("An error occurred: upstream failure");

    let response = app(provider)
        .oneshot(post_json("/api/lesson-plans", lesson_request("heading_delimited")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["code"], "MODEL_ERROR");
    assert_eq!(body["message"], "An error occurred: upstream failure");
}

#[tokio::test]
async fn provider_timeout_is_504() {
    let provider = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 60 });

    let response = app(provider)
        .oneshot(post_json("/api/lesson-plans", lesson_request("fenced_json")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json_body(response).await["code"], "MODEL_TIMEOUT");
}

#[tokio::test]
async fn provider_outage_is_502() {
    let provider = MockAIProvider::new().with_error(MockError::Unavailable {
        message: "overloaded".to_string(),
    });

    let response = app(provider)
        .oneshot(post_json("/api/lesson-plans", lesson_request("fenced_json")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn markdown_export_is_attachment() {
    let response = app(MockAIProvider::new())
        .oneshot(post_json("/api/lesson-plans/export?format=md", export_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/markdown; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Water_Cycle_lesson_plan.md\""
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        &bytes[..],
        b"# Water Cycle\n\n## Materials\n\n- Beaker\n- Kettle\n\n## Assessment\n\nExit ticket"
    );
}

#[tokio::test]
async fn pdf_and_docx_exports_have_their_signatures() {
    for (format, magic, content_type) in [
        ("pdf", &b"%PDF"[..], "application/pdf"),
        (
            "docx",
            &b"PK"[..],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
    ] {
        let response = app(MockAIProvider::new())
            .oneshot(post_json(
                &format!("/api/lesson-plans/export?format={}", format),
                export_body(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], content_type);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(magic), "{} export has wrong signature", format);
    }
}

#[tokio::test]
async fn lossy_pdf_export_sets_warning_header() {
    let mut body = export_body();
    body["plan"]["title"] = json!("जल चक्र");

    let response = app(MockAIProvider::new())
        .oneshot(post_json("/api/lesson-plans/export?format=pdf", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-export-warnings"));
}

#[tokio::test]
async fn unknown_export_format_is_400() {
    let response = app(MockAIProvider::new())
        .oneshot(post_json("/api/lesson-plans/export?format=odt", export_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn export_is_saved_when_storage_configured() {
    let temp = TempDir::new().unwrap();
    let exporter = Arc::new(LessonPlanExportService::new());
    let handler = ExportLessonPlanHandler::new(exporter)
        .with_naming(FileNaming::Topic)
        .with_storage(Arc::new(LocalExportStorage::new(temp.path())));

    let response = app_with(MockAIProvider::new(), handler)
        .oneshot(post_json("/api/lesson-plans/export?format=docx", export_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(temp.path().join("Water_Cycle_lesson_plan.docx").is_file());
}
