//! Markdown rendering of lesson plans.

use crate::domain::lesson::{LessonPlan, SectionContent};

/// Renders a plan as Markdown.
///
/// Layout: `# <title>`, then per section `## <name>`, a blank line, the
/// bullets or raw text, and a blank separator. The result is trimmed, so
/// the same plan always yields the same bytes.
pub fn render_markdown(plan: &LessonPlan) -> String {
    let mut lines = vec![format!("# {}\n", plan.title())];

    for (name, content) in plan.ordered_sections() {
        lines.push(format!("## {}\n", name));
        match content {
            SectionContent::Items(items) => {
                lines.extend(items.iter().map(|item| format!("- {}", item)));
            }
            SectionContent::Text(text) => lines.push(text.clone()),
        }
        lines.push(String::new());
    }

    lines.join("\n").trim().to_string()
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
