//! Fenced JSON interpreter.
//!
//! Accepts a JSON object, optionally wrapped in one Markdown code fence:
//!
//! ````text
//! ```json
//! {"title": "...", "sections": {"Materials": ["..."], "Assessment": "..."}}
//! ```
//! ````
//!
//! Anything that is not a valid object with a string `title` and a
//! `sections` object of strings or string arrays is a hard error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::lesson::{LessonPlan, ResponseFormat, SectionContent, SectionName};
use crate::ports::{InterpretError, InterpretedResponse, Interpretation, ResponseInterpreter};

/// Opening fence line: three backticks, optionally tagged `json`.
static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[ \t]*(?i:json)?[ \t]*$").expect("fence pattern is valid"));

const CLOSING_FENCE: &str = "```";

/// Shape the model is asked to return.
#[derive(Debug, Deserialize)]
struct WirePlan {
    title: String,
    sections: Map<String, Value>,
}

/// Interpreter for JSON answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedJsonInterpreter;

impl FencedJsonInterpreter {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseInterpreter for FencedJsonInterpreter {
    fn format(&self) -> ResponseFormat {
        ResponseFormat::FencedJson
    }

    fn interpret(&self, raw: &str, _default_title: &str) -> Result<Interpretation, InterpretError> {
        let payload = strip_fence(raw);

        let wire: WirePlan = serde_json::from_str(payload).map_err(|e| {
            tracing::warn!(error = %e, "Model response is not a valid lesson plan object");
            InterpretError::malformed(e.to_string())
        })?;

        let mut plan = LessonPlan::new(wire.title);
        for (key, value) in wire.sections {
            let content = section_content(&key, value)?;
            match key.parse::<SectionName>() {
                Ok(name) => plan = plan.with_section(name, content),
                Err(_) => tracing::debug!(section = %key, "Dropping unknown section"),
            }
        }

        Ok(Interpretation::Parsed(InterpretedResponse::new(plan)))
    }
}

/// Removes at most one leading and one trailing fence line.
pub fn strip_fence(raw: &str) -> &str {
    let mut body = raw.trim();

    let (first, rest) = body.split_once('\n').unwrap_or((body, ""));
    if OPENING_FENCE.is_match(first.trim_end()) {
        body = rest;
    }

    match body.rsplit_once('\n') {
        Some((head, last)) if last.trim() == CLOSING_FENCE => body = head,
        None if body.trim() == CLOSING_FENCE => body = "",
        _ => {}
    }

    body.trim()
}

fn section_content(key: &str, value: Value) -> Result<SectionContent, InterpretError> {
    match value {
        Value::String(text) => Ok(SectionContent::Text(text)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                other => Err(InterpretError::malformed(format!(
                    "section '{}' contains a non-string item: {}",
                    key, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SectionContent::Items),
        other => Err(InterpretError::malformed(format!(
            "section '{}' must be a string or an array of strings, got {}",
            key,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
