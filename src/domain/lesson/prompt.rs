//! Prompt rendering for lesson requests.
//!
//! Two templates exist, one per [`ResponseFormat`]. Both embed the same
//! request context; they differ only in the answer grammar they ask for.

use super::plan::{SectionName, STRUCTURED_SECTIONS};
use super::request::{LessonRequest, ResponseFormat};

/// Placeholder for empty list fields.
const EMPTY_LIST: &str = "-";

/// System instruction sent with every prompt.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert curriculum designer for K-12 education. \
You write concise, actionable lesson plans with age-appropriate language, aligned to the \
requested board's syllabus conventions.";

/// A prompt ready for the model boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    pub system: String,
    pub user: String,
}

/// Renders a [`LessonRequest`] into a prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptRenderer;

impl PromptRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders the prompt matching the request's response format.
    pub fn render(&self, request: &LessonRequest) -> RenderedPrompt {
        let user = match request.response_format() {
            ResponseFormat::FencedJson => self.render_json(request),
            ResponseFormat::HeadingDelimited => self.render_headings(request),
        };

        RenderedPrompt {
            system: SYSTEM_INSTRUCTION.to_string(),
            user,
        }
    }

    fn render_json(&self, request: &LessonRequest) -> String {
        let keys = STRUCTURED_SECTIONS
            .iter()
            .map(SectionName::display_name)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Create a concise, actionable lesson plan.\n\
             Return JSON with fields: title (string), sections (object) containing keys\n\
             {keys}.\n\
             Keep lists as arrays of bullet points where appropriate. Avoid overlong prose.\n\
             Context:\n\
             {context}\
             Ensure age-appropriate language and alignment to the board.\n",
            keys = keys,
            context = context_block(request),
        )
    }

    fn render_headings(&self, request: &LessonRequest) -> String {
        let mut headings = vec![
            format!(
                "### {} (2-3 sentences)",
                SectionName::Introduction.display_name()
            ),
            format!(
                "### {} (brief description of one engaging activity)",
                SectionName::MainActivity.display_name()
            ),
            format!(
                "### {} (2-3 sentences of wrap-up)",
                SectionName::Conclusion.display_name()
            ),
        ];
        if request.include_quiz() {
            headings.push(format!(
                "### {} (3 short questions with answers)",
                SectionName::Quiz.display_name()
            ));
        }

        format!(
            "Create a lesson plan outline for a {minutes}-minute class.\n\
             Use exactly these Markdown headings, in this order, each on its own line:\n\
             {headings}\n\
             Use bullet points where appropriate for readability.\n\
             Context:\n\
             {context}",
            minutes = request.duration().minutes(),
            headings = headings.join("\n"),
            context = context_block(request),
        )
    }
}

fn context_block(request: &LessonRequest) -> String {
    format!(
        "- Board: {}\n\
         - Grade: {}\n\
         - Subject: {}\n\
         - Topic: {}\n\
         - Duration: {}\n\
         - Pedagogy: {}\n\
         - Bloom: {}\n\
         - Learning Objectives: {}\n\
         - Constraints: {}\n",
        request.board(),
        request.grade(),
        request.subject(),
        request.topic(),
        request.duration(),
        request.pedagogy(),
        request.bloom(),
        join_or_placeholder(request.learning_objectives()),
        join_or_placeholder(request.constraints()),
    )
}

fn join_or_placeholder(entries: &[String]) -> String {
    if entries.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        entries.join(", ")
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
