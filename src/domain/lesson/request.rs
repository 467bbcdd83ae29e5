//! LessonRequest value object and its builder.
//!
//! A request is only ever produced by [`LessonRequestBuilder::build`], which
//! normalizes whitespace and enforces the submission invariants. Once built
//! the request is immutable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::curriculum::{BloomLevel, LessonDuration, Pedagogy};
use crate::domain::foundation::ValidationError;

/// Lowest grade accepted by the form.
pub const MIN_GRADE: u8 = 1;

/// Highest grade accepted by the form.
pub const MAX_GRADE: u8 = 12;

/// Grammar the model is asked to answer in.
///
/// The interpreter is chosen from this flag, never from the shape of the
/// returned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Markdown with fixed `### <label>` headings.
    HeadingDelimited,
    /// A JSON object, possibly wrapped in a code fence.
    #[default]
    FencedJson,
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::HeadingDelimited => write!(f, "heading_delimited"),
            ResponseFormat::FencedJson => write!(f, "fenced_json"),
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heading_delimited" | "headings" | "markdown" => Ok(ResponseFormat::HeadingDelimited),
            "fenced_json" | "json" => Ok(ResponseFormat::FencedJson),
            other => Err(ValidationError::invalid_format(
                "response_format",
                format!("unknown response format '{}'", other),
            )),
        }
    }
}

/// A validated request for one lesson plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonRequest {
    board: String,
    grade: u8,
    subject: String,
    topic: String,
    duration: LessonDuration,
    pedagogy: Pedagogy,
    bloom: BloomLevel,
    learning_objectives: Vec<String>,
    constraints: Vec<String>,
    response_format: ResponseFormat,
    include_quiz: bool,
}

impl LessonRequest {
    /// Starts building a request.
    pub fn builder() -> LessonRequestBuilder {
        LessonRequestBuilder::default()
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    pub fn grade(&self) -> u8 {
        self.grade
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn duration(&self) -> LessonDuration {
        self.duration
    }

    pub fn pedagogy(&self) -> Pedagogy {
        self.pedagogy
    }

    pub fn bloom(&self) -> BloomLevel {
        self.bloom
    }

    pub fn learning_objectives(&self) -> &[String] {
        &self.learning_objectives
    }

    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    pub fn include_quiz(&self) -> bool {
        self.include_quiz
    }

    /// Title used when the model's answer carries none.
    pub fn default_title(&self) -> String {
        format!("{} Lesson Plan", self.topic)
    }
}

/// Builder for [`LessonRequest`].
///
/// Setters accept raw form input; all normalization happens in `build`.
#[derive(Debug, Clone, Default)]
pub struct LessonRequestBuilder {
    board: Option<String>,
    grade: Option<i32>,
    subject: Option<String>,
    topic: Option<String>,
    duration: LessonDuration,
    pedagogy: Pedagogy,
    bloom: BloomLevel,
    learning_objectives: Vec<String>,
    constraints: Vec<String>,
    response_format: ResponseFormat,
    include_quiz: bool,
}

impl LessonRequestBuilder {
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    pub fn grade(mut self, grade: i32) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn duration(mut self, duration: LessonDuration) -> Self {
        self.duration = duration;
        self
    }

    pub fn pedagogy(mut self, pedagogy: Pedagogy) -> Self {
        self.pedagogy = pedagogy;
        self
    }

    pub fn bloom(mut self, bloom: BloomLevel) -> Self {
        self.bloom = bloom;
        self
    }

    pub fn learning_objectives<I, S>(mut self, objectives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.learning_objectives = objectives.into_iter().map(Into::into).collect();
        self
    }

    pub fn constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    pub fn include_quiz(mut self, include: bool) -> Self {
        self.include_quiz = include;
        self
    }

    /// Validates and normalizes the collected fields.
    ///
    /// # Errors
    ///
    /// - `EmptyField` when board, subject or topic is missing or blank
    /// - `OutOfRange` when grade is outside 1..=12
    pub fn build(self) -> Result<LessonRequest, ValidationError> {
        let board = required_text("board", self.board)?;
        let subject = required_text("subject", self.subject)?;
        let topic = required_text("topic", self.topic)?;

        let grade = self.grade.ok_or_else(|| ValidationError::empty_field("grade"))?;
        if grade < MIN_GRADE as i32 || grade > MAX_GRADE as i32 {
            return Err(ValidationError::out_of_range(
                "grade",
                MIN_GRADE as i32,
                MAX_GRADE as i32,
                grade,
            ));
        }

        Ok(LessonRequest {
            board,
            grade: grade as u8,
            subject,
            topic,
            duration: self.duration,
            pedagogy: self.pedagogy,
            bloom: self.bloom,
            learning_objectives: clean_entries(self.learning_objectives),
            constraints: clean_entries(self.constraints),
            response_format: self.response_format,
            include_quiz: self.include_quiz,
        })
    }
}

/// Splits a comma-separated objectives field into entries.
pub fn parse_objectives(raw: &str) -> Vec<String> {
    clean_entries(raw.split(','))
}

/// Splits a multi-line constraints field into one entry per line.
pub fn parse_constraints(raw: &str) -> Vec<String> {
    clean_entries(raw.lines())
}

fn required_text(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

fn clean_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_builder() -> LessonRequestBuilder {
        LessonRequest::builder()
            .board("CBSE")
            .grade(5)
            .subject("Mathematics")
            .topic("Fractions")
    }

    // ───────────────────────────────────────────────────────────────
    // Builder validation
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn build_trims_text_fields() {
        let request = LessonRequest::builder()
            .board("  ICSE ")
            .grade(7)
            .subject(" Physics\t")
            .topic("  Light  ")
            .build()
            .unwrap();

        assert_eq!(request.board(), "ICSE");
        assert_eq!(request.subject(), "Physics");
        assert_eq!(request.topic(), "Light");
    }

    #[test]
    fn build_rejects_blank_topic() {
        let err = valid_builder().topic("   ").build().unwrap_err();
        assert_eq!(err, ValidationError::empty_field("topic"));
    }

    #[test]
    fn build_rejects_missing_board() {
        let err = LessonRequest::builder()
            .grade(5)
            .subject("Science")
            .topic("Plants")
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "board");
    }

    #[test]
    fn build_rejects_grade_out_of_range() {
        assert!(matches!(
            valid_builder().grade(0).build(),
            Err(ValidationError::OutOfRange { actual: 0, .. })
        ));
        assert!(matches!(
            valid_builder().grade(13).build(),
            Err(ValidationError::OutOfRange { actual: 13, .. })
        ));
        assert!(valid_builder().grade(1).build().is_ok());
        assert!(valid_builder().grade(12).build().is_ok());
    }

    #[test]
    fn build_drops_blank_objectives_and_constraints() {
        let request = valid_builder()
            .learning_objectives(vec![" Identify ", "", "  "])
            .constraints(vec!["", "No projector"])
            .build()
            .unwrap();

        assert_eq!(request.learning_objectives(), ["Identify"]);
        assert_eq!(request.constraints(), ["No projector"]);
    }

    #[test]
    fn build_applies_form_defaults() {
        let request = valid_builder().build().unwrap();
        assert_eq!(request.duration(), LessonDuration::Minutes45);
        assert_eq!(request.pedagogy(), Pedagogy::InquiryBased);
        assert_eq!(request.bloom(), BloomLevel::Apply);
        assert_eq!(request.response_format(), ResponseFormat::FencedJson);
        assert!(!request.include_quiz());
    }

    #[test]
    fn default_title_uses_topic() {
        let request = valid_builder().build().unwrap();
        assert_eq!(request.default_title(), "Fractions Lesson Plan");
    }

    // ───────────────────────────────────────────────────────────────
    // Field parsing helpers
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn parse_objectives_splits_on_commas() {
        assert_eq!(
            parse_objectives("Identify, Explain ,, Apply"),
            vec!["Identify", "Explain", "Apply"]
        );
        assert!(parse_objectives("  ").is_empty());
    }

    #[test]
    fn parse_constraints_splits_on_lines() {
        assert_eq!(
            parse_constraints("40 students\n\n  no lab access \n"),
            vec!["40 students", "no lab access"]
        );
    }

    #[test]
    fn response_format_parses_aliases() {
        assert_eq!(
            "json".parse::<ResponseFormat>().unwrap(),
            ResponseFormat::FencedJson
        );
        assert_eq!(
            "Heading_Delimited".parse::<ResponseFormat>().unwrap(),
            ResponseFormat::HeadingDelimited
        );
        assert!("yaml".parse::<ResponseFormat>().is_err());
    }
}
