//! HTTP DTOs for lesson plan endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::lesson::{
    parse_constraints, parse_objectives, subjects_for, BloomLevel, LessonDuration, LessonPlan,
    LessonRequest, Pedagogy, ResponseFormat, BOARDS,
};
use crate::ports::InterpretWarning;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A list field sent either as an array or as the raw form text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    List(Vec<String>),
    Text(String),
}

impl Default for ListField {
    fn default() -> Self {
        ListField::List(Vec::new())
    }
}

/// Request to generate a lesson plan.
///
/// Text fields default to empty so that missing values are reported by
/// request validation rather than by JSON extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateLessonPlanRequest {
    #[serde(default)]
    pub board: String,
    pub grade: Option<i32>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    pub duration: Option<String>,
    pub pedagogy: Option<String>,
    pub bloom: Option<String>,
    /// Array, or comma-separated text.
    #[serde(default)]
    pub learning_objectives: ListField,
    /// Array, or one constraint per line.
    #[serde(default)]
    pub constraints: ListField,
    pub response_format: Option<ResponseFormat>,
    #[serde(default)]
    pub include_quiz: bool,
}

impl GenerateLessonPlanRequest {
    /// Validates the body into a domain request.
    pub fn into_lesson_request(self) -> Result<LessonRequest, ValidationError> {
        let mut builder = LessonRequest::builder()
            .board(self.board)
            .subject(self.subject)
            .topic(self.topic)
            .learning_objectives(match self.learning_objectives {
                ListField::List(items) => items,
                ListField::Text(raw) => parse_objectives(&raw),
            })
            .constraints(match self.constraints {
                ListField::List(items) => items,
                ListField::Text(raw) => parse_constraints(&raw),
            })
            .include_quiz(self.include_quiz);

        if let Some(grade) = self.grade {
            builder = builder.grade(grade);
        }
        if let Some(duration) = self.duration {
            builder = builder.duration(duration.parse::<LessonDuration>()?);
        }
        if let Some(pedagogy) = self.pedagogy {
            builder = builder.pedagogy(pedagogy.parse::<Pedagogy>()?);
        }
        if let Some(bloom) = self.bloom {
            builder = builder.bloom(bloom.parse::<BloomLevel>()?);
        }
        if let Some(format) = self.response_format {
            builder = builder.response_format(format);
        }

        builder.build()
    }
}

/// Request to export an already generated plan.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportLessonPlanRequest {
    pub plan: LessonPlan,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
}

/// Query parameters for the export endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportQuery {
    /// `md`, `markdown`, `pdf` or `docx`; Markdown when absent.
    pub format: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A generated plan with its Markdown rendering.
#[derive(Debug, Clone, Serialize)]
pub struct LessonPlanResponse {
    pub plan: LessonPlan,
    pub markdown: String,
    pub warnings: Vec<String>,
    pub trace_id: String,
    pub model: String,
}

impl LessonPlanResponse {
    pub fn warning_messages(warnings: &[InterpretWarning]) -> Vec<String> {
        warnings.iter().map(ToString::to_string).collect()
    }
}

/// One board with its subject suggestions.
#[derive(Debug, Clone, Serialize)]
pub struct BoardResponse {
    pub name: String,
    pub subjects: Vec<String>,
}

/// The form vocabularies.
#[derive(Debug, Clone, Serialize)]
pub struct CurriculumResponse {
    pub boards: Vec<BoardResponse>,
    pub durations: Vec<LessonDuration>,
    pub pedagogies: Vec<Pedagogy>,
    pub bloom_levels: Vec<BloomLevel>,
}

impl CurriculumResponse {
    pub fn catalogue() -> Self {
        Self {
            boards: BOARDS
                .iter()
                .map(|board| BoardResponse {
                    name: board.to_string(),
                    subjects: subjects_for(board).iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
            durations: LessonDuration::all().to_vec(),
            pedagogies: Pedagogy::all().to_vec(),
            bloom_levels: BloomLevel::all().to_vec(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn validation(error: &ValidationError) -> Self {
        Self::new("VALIDATION_FAILED", error.to_string())
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_RESPONSE", message)
    }

    pub fn model_error(message: impl Into<String>) -> Self {
        Self::new("MODEL_ERROR", message)
    }

    pub fn model_timeout(message: impl Into<String>) -> Self {
        Self::new("MODEL_TIMEOUT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lesson::SectionName;

    fn body(json: &str) -> GenerateLessonPlanRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn generate_request_accepts_display_strings() {
        let request = body(
            r#"{"board":"ICSE","grade":9,"subject":"Physics","topic":"Motion",
                "duration":"60 min","pedagogy":"Project-Based","bloom":"Analyze",
                "response_format":"heading_delimited","include_quiz":true}"#,
        )
        .into_lesson_request()
        .unwrap();

        assert_eq!(request.duration(), LessonDuration::Minutes60);
        assert_eq!(request.pedagogy(), Pedagogy::ProjectBased);
        assert_eq!(request.bloom(), BloomLevel::Analyze);
        assert_eq!(request.response_format(), ResponseFormat::HeadingDelimited);
        assert!(request.include_quiz());
    }

    #[test]
    fn list_fields_accept_form_text() {
        let request = body(
            r#"{"board":"CBSE","grade":5,"subject":"Science","topic":"Plants",
                "learning_objectives":"name parts, , explain roots",
                "constraints":"No lab\n\n40 students"}"#,
        )
        .into_lesson_request()
        .unwrap();

        assert_eq!(request.learning_objectives(), ["name parts", "explain roots"]);
        assert_eq!(request.constraints(), ["No lab", "40 students"]);
        assert_eq!(request.response_format(), ResponseFormat::FencedJson);
    }

    #[test]
    fn missing_topic_is_a_validation_error() {
        let err = body(r#"{"board":"CBSE","grade":5,"subject":"Science"}"#)
            .into_lesson_request()
            .unwrap_err();
        assert_eq!(err.field(), "topic");
    }

    #[test]
    fn unknown_pedagogy_is_a_validation_error() {
        let err = body(
            r#"{"board":"CBSE","grade":5,"subject":"Science","topic":"Plants","pedagogy":"Osmosis"}"#,
        )
        .into_lesson_request()
        .unwrap_err();
        assert_eq!(err.field(), "pedagogy");
    }

    #[test]
    fn export_request_reads_plan_sections() {
        let request: ExportLessonPlanRequest = serde_json::from_str(
            r#"{"plan":{"title":"T","sections":{"Materials":["Chalk"],"Homework/Extensions":"Read"}},
                "subject":"Science","topic":"Plants"}"#,
        )
        .unwrap();

        assert_eq!(request.plan.section_count(), 2);
        assert!(request.plan.section(SectionName::Materials).is_some());
    }

    #[test]
    fn curriculum_lists_every_board() {
        let catalogue = CurriculumResponse::catalogue();
        assert_eq!(catalogue.boards.len(), BOARDS.len());
        assert!(catalogue.boards[0].subjects.contains(&"Mathematics".to_string()));

        let json = serde_json::to_value(&catalogue).unwrap();
        assert_eq!(json["durations"][0], "30 min");
        assert_eq!(json["pedagogies"][0], "Direct Instruction");
    }
}
