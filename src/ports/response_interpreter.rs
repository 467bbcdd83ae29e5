//! Response Interpreter Port - Turns raw model output into a lesson plan.
//!
//! Two strategies implement this port, one per [`ResponseFormat`]. The
//! caller picks the strategy from the request's declared format; the raw
//! text is never sniffed to decide which grammar applies.

use thiserror::Error;

use crate::domain::lesson::{LessonPlan, LessonRequest, ResponseFormat, SectionName};

/// Port for interpreting raw model output.
///
/// # Contract
///
/// Implementations must:
/// - Return soft problems (missing headings) as warnings on the result
/// - Return hard problems (unparseable payloads) as `InterpretError`
/// - Never decide the grammar from the shape of `raw`
pub trait ResponseInterpreter: Send + Sync {
    /// The grammar this interpreter understands.
    fn format(&self) -> ResponseFormat;

    /// Interpret the raw model text.
    ///
    /// `default_title` is used when the grammar carries no title of its own.
    fn interpret(&self, raw: &str, default_title: &str) -> Result<Interpretation, InterpretError>;
}

/// Port for choosing the interpreter a request declared.
pub trait InterpreterFactory: Send + Sync {
    fn interpreter_for(&self, request: &LessonRequest) -> Box<dyn ResponseInterpreter>;
}

/// Outcome of a successful interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// A plan was produced, possibly with soft warnings.
    Parsed(InterpretedResponse),
    /// The model reported an error instead of a plan. Carries the raw text.
    ErrorReport(String),
}

impl Interpretation {
    /// Returns the parsed response, if any.
    pub fn parsed(&self) -> Option<&InterpretedResponse> {
        match self {
            Interpretation::Parsed(response) => Some(response),
            Interpretation::ErrorReport(_) => None,
        }
    }

    /// Returns true if the model reported an error.
    pub fn is_error_report(&self) -> bool {
        matches!(self, Interpretation::ErrorReport(_))
    }
}

/// A plan plus the soft warnings collected while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedResponse {
    pub plan: LessonPlan,
    pub warnings: Vec<InterpretWarning>,
}

impl InterpretedResponse {
    pub fn new(plan: LessonPlan) -> Self {
        Self {
            plan,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(plan: LessonPlan, warnings: Vec<InterpretWarning>) -> Self {
        Self { plan, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Soft interpretation problem. Never aborts the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretWarning {
    /// An expected heading was absent; its fallback text was used.
    #[error("Section not found: {section}")]
    SectionNotFound { section: SectionName },
}

impl InterpretWarning {
    pub fn section_not_found(section: SectionName) -> Self {
        Self::SectionNotFound { section }
    }
}

/// Hard interpretation failure. No plan is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// The payload was not valid for the declared grammar.
    #[error("Malformed model response: {reason}")]
    MalformedResponse { reason: String },
}

impl InterpretError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
