//! Response interpreters - Implementations of `ResponseInterpreter`.
//!
//! - `HeadingDelimitedInterpreter` - `### <Label>` Markdown answers
//! - `FencedJsonInterpreter` - JSON answers, optionally code-fenced

mod fenced_json;
mod heading_delimited;

pub use fenced_json::{strip_fence, FencedJsonInterpreter};
pub use heading_delimited::{fallback_text, HeadingDelimitedInterpreter, ERROR_PREFIX};

use crate::domain::lesson::{LessonRequest, ResponseFormat};
use crate::ports::{InterpreterFactory, ResponseInterpreter};

/// Returns the interpreter for a declared response format.
pub fn interpreter_for(format: ResponseFormat, include_quiz: bool) -> Box<dyn ResponseInterpreter> {
    match format {
        ResponseFormat::HeadingDelimited => Box::new(HeadingDelimitedInterpreter::new(include_quiz)),
        ResponseFormat::FencedJson => Box::new(FencedJsonInterpreter::new()),
    }
}

/// Picks the interpreter from the request's `response_format`, with the
/// quiz heading enabled when the request asked for one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredFormatInterpreters;

impl InterpreterFactory for DeclaredFormatInterpreters {
    fn interpreter_for(&self, request: &LessonRequest) -> Box<dyn ResponseInterpreter> {
        interpreter_for(request.response_format(), request.include_quiz())
    }
}
