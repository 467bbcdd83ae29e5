//! Heading-delimited Markdown interpreter.
//!
//! Reads answers shaped like:
//!
//! ```text
//! ### Introduction (5 Minutes)
//! Hook the class with a question.
//! ### Main Activity
//! ...
//! ```
//!
//! Each expected label owns the text between its heading line and the next
//! `###` marker. Missing labels degrade to a fallback sentence and a
//! warning; this interpreter never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::lesson::{LessonPlan, ResponseFormat, SectionName};
use crate::ports::{
    InterpretError, InterpretWarning, InterpretedResponse, Interpretation, ResponseInterpreter,
};

/// Prefix the model client uses when it returns an error instead of a plan.
pub const ERROR_PREFIX: &str = "An error occurred";

/// Matches any `###` heading line, with optional indentation.
static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*###(?P<heading>[^\n]*)$").expect("heading marker pattern is valid")
});

/// Text used for a section whose heading never appeared.
pub fn fallback_text(section: SectionName) -> String {
    format!("Could not parse {}.", section.display_name())
}

/// Interpreter for `### <Label>` delimited answers.
#[derive(Debug, Clone)]
pub struct HeadingDelimitedInterpreter {
    labels: Vec<SectionName>,
}

impl HeadingDelimitedInterpreter {
    /// Creates an interpreter for the Introduction / Main Activity /
    /// Conclusion triad, plus Quiz when `include_quiz` is set.
    pub fn new(include_quiz: bool) -> Self {
        let mut labels = vec![
            SectionName::Introduction,
            SectionName::MainActivity,
            SectionName::Conclusion,
        ];
        if include_quiz {
            labels.push(SectionName::Quiz);
        }
        Self { labels }
    }

    fn parse_sections(&self, raw: &str, default_title: &str) -> InterpretedResponse {
        let headings = locate_headings(raw);
        let mut plan = LessonPlan::new(default_title);
        let mut warnings = Vec::new();

        for label in &self.labels {
            let body = headings
                .iter()
                .find(|h| heading_matches(h.text, label.display_name()))
                .map(|h| raw[h.body_start..h.body_end].trim().to_string());

            match body {
                Some(text) => plan = plan.with_section(*label, text),
                None => {
                    tracing::debug!(section = %label, "Heading not found in model response");
                    warnings.push(InterpretWarning::section_not_found(*label));
                    plan = plan.with_section(*label, fallback_text(*label));
                }
            }
        }

        InterpretedResponse::with_warnings(plan, warnings)
    }
}

impl Default for HeadingDelimitedInterpreter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ResponseInterpreter for HeadingDelimitedInterpreter {
    fn format(&self) -> ResponseFormat {
        ResponseFormat::HeadingDelimited
    }

    fn interpret(&self, raw: &str, default_title: &str) -> Result<Interpretation, InterpretError> {
        // Case-sensitive and untrimmed on purpose: only a leading error report counts.
        if raw.starts_with(ERROR_PREFIX) {
            tracing::warn!("Model response is an error report, skipping section parsing");
            return Ok(Interpretation::ErrorReport(raw.to_string()));
        }

        Ok(Interpretation::Parsed(self.parse_sections(raw, default_title)))
    }
}

/// One `###` line and the byte range of the body that follows it.
#[derive(Debug)]
struct Heading<'a> {
    text: &'a str,
    body_start: usize,
    body_end: usize,
}

fn locate_headings(raw: &str) -> Vec<Heading<'_>> {
    let markers: Vec<_> = HEADING_MARKER.captures_iter(raw).collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(idx, caps)| {
            let line = caps.get(0)?;
            let text = caps.name("heading")?.as_str();
            let body_end = markers
                .get(idx + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(raw.len());
            Some(Heading {
                text,
                body_start: line.end().min(body_end),
                body_end,
            })
        })
        .collect()
}

/// True when `heading`, stripped of leading decoration, starts with `label`
/// as a whole word.
fn heading_matches(heading: &str, label: &str) -> bool {
    let stripped = heading.trim_start_matches(|c: char| !c.is_alphabetic());

    let Some(prefix) = stripped.get(..label.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(label) {
        return false;
    }

    !stripped[label.len()..]
        .chars()
        .next()
        .is_some_and(char::is_alphanumeric)
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
