//! Integration tests for the interpret-then-render pipeline.
//!
//! These tests drive the public adapters end to end:
//! 1. Raw model text is interpreted by the declared strategy
//! 2. The resulting plan renders identically ordered in all three formats
//! 3. Markdown rendering is deterministic

use proptest::prelude::*;

use planit::adapters::document::{
    docx_blocks, render_markdown, Charset, DocxBlock, FontMetrics, PdfLayout, Sanitizer, TextStyle,
    MARGIN_PT, PAGE_WIDTH_PT,
};
use planit::adapters::interpreter::{
    fallback_text, interpreter_for, FencedJsonInterpreter, HeadingDelimitedInterpreter,
};
use planit::domain::lesson::{
    LessonPlan, ResponseFormat, SectionContent, SectionName, SECTION_ORDER,
};
use planit::ports::{InterpretWarning, Interpretation, ResponseInterpreter};

// =============================================================================
// Helpers
// =============================================================================

fn parsed_plan(interpretation: Interpretation) -> LessonPlan {
    match interpretation {
        Interpretation::Parsed(parsed) => parsed.plan,
        Interpretation::ErrorReport(raw) => panic!("unexpected error report: {}", raw),
    }
}

fn text(plan: &LessonPlan, name: SectionName) -> &str {
    match plan.section(name) {
        Some(SectionContent::Text(text)) => text,
        other => panic!("expected text for {}, got {:?}", name, other),
    }
}

fn markdown_headings(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .map(str::to_string)
        .collect()
}

fn pdf_headings(plan: &LessonPlan) -> Vec<String> {
    PdfLayout::build(plan, &mut Sanitizer::new(Charset::WinAnsi), FontMetrics::Helvetica)
        .lines()
        .filter(|line| line.style == TextStyle::Heading)
        .map(|line| line.text.clone())
        .collect()
}

fn docx_headings(plan: &LessonPlan) -> Vec<String> {
    docx_blocks(plan, &mut Sanitizer::new(Charset::Unicode))
        .into_iter()
        .filter_map(|block| match block {
            DocxBlock::SectionHeading(name) => Some(name),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Fenced JSON
// =============================================================================

#[test]
fn json_plan_renders_in_fixed_order() {
    let raw = r#"{"title":"T","sections":{"Assessment":"Quiz","Materials":["a","b"]}}"#;
    let plan = parsed_plan(FencedJsonInterpreter::new().interpret(raw, "unused").unwrap());

    let markdown = render_markdown(&plan);

    assert_eq!(
        markdown,
        "# T\n\n## Materials\n\n- a\n- b\n\n## Assessment\n\nQuiz"
    );
    assert!(markdown.find("## Materials").unwrap() < markdown.find("## Assessment").unwrap());
}

#[test]
fn fenced_payload_parses_like_bare_payload() {
    let interpreter = FencedJsonInterpreter::new();
    let fenced = interpreter
        .interpret("```json\n{\"title\":\"X\",\"sections\":{}}\n```", "unused")
        .unwrap();
    let bare = interpreter
        .interpret("{\"title\":\"X\",\"sections\":{}}", "unused")
        .unwrap();

    assert_eq!(fenced, bare);
    assert_eq!(parsed_plan(fenced).title(), "X");
}

#[test]
fn fenced_payload_without_closing_fence_parses() {
    let plan = parsed_plan(
        FencedJsonInterpreter::new()
            .interpret("```JSON\n{\"title\":\"X\",\"sections\":{\"Quiz\":\"Q1\"}}", "unused")
            .unwrap(),
    );
    assert_eq!(text(&plan, SectionName::Quiz), "Q1");
}

#[test]
fn prose_around_json_is_malformed() {
    let result = FencedJsonInterpreter::new()
        .interpret("Here you go:\n{\"title\":\"X\",\"sections\":{}}", "unused");
    assert!(result.is_err());
}

// =============================================================================
// Heading delimited
// =============================================================================

#[test]
fn heading_text_splits_into_three_sections() {
    let raw = "### Introduction\nHook here.\n### Main Activity\nDo X.\n### Conclusion\nWrap up.";
    let interpretation = HeadingDelimitedInterpreter::new(false)
        .interpret(raw, "Plants Lesson Plan")
        .unwrap();
    let plan = parsed_plan(interpretation);

    assert_eq!(plan.title(), "Plants Lesson Plan");
    assert_eq!(text(&plan, SectionName::Introduction), "Hook here.");
    assert_eq!(text(&plan, SectionName::MainActivity), "Do X.");
    assert_eq!(text(&plan, SectionName::Conclusion), "Wrap up.");
    assert!(plan
        .ordered_sections()
        .all(|(_, content)| !matches!(content, SectionContent::Text(t) if t.contains("###"))));
}

#[test]
fn missing_headings_fall_back_with_warnings() {
    let interpretation = HeadingDelimitedInterpreter::new(false)
        .interpret("### Introduction\nHi.", "T")
        .unwrap();

    let parsed = interpretation.parsed().unwrap().clone();
    assert_eq!(
        parsed.warnings,
        vec![
            InterpretWarning::section_not_found(SectionName::MainActivity),
            InterpretWarning::section_not_found(SectionName::Conclusion),
        ]
    );
    assert_eq!(
        text(&parsed.plan, SectionName::MainActivity),
        fallback_text(SectionName::MainActivity)
    );
    assert_eq!(
        text(&parsed.plan, SectionName::Conclusion),
        "Could not parse Conclusion."
    );
}

#[test]
fn error_text_short_circuits() {
    let interpretation = HeadingDelimitedInterpreter::new(true)
        .interpret("An error occurred: timeout", "T")
        .unwrap();

    assert_eq!(
        interpretation,
        Interpretation::ErrorReport("An error occurred: timeout".to_string())
    );
}

#[test]
fn declared_format_selects_interpreter() {
    let raw = "### Introduction\nHi.";
    assert!(interpreter_for(ResponseFormat::HeadingDelimited, false)
        .interpret(raw, "T")
        .is_ok());
    assert!(interpreter_for(ResponseFormat::FencedJson, false)
        .interpret(raw, "T")
        .is_err());
}

// =============================================================================
// Cross-renderer properties
// =============================================================================

fn content_strategy() -> impl Strategy<Value = SectionContent> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(SectionContent::Text),
        prop::collection::vec("[a-z]{1,8}", 0..4).prop_map(SectionContent::Items),
    ]
}

fn plan_strategy() -> impl Strategy<Value = LessonPlan> {
    (
        "[A-Za-z ]{1,30}",
        prop::collection::vec(prop::option::of(content_strategy()), SECTION_ORDER.len()),
    )
        .prop_map(|(title, contents)| {
            SECTION_ORDER
                .iter()
                .zip(contents)
                .fold(LessonPlan::new(title), |plan, (name, content)| match content {
                    Some(content) => plan.with_section(*name, content),
                    None => plan,
                })
        })
}

proptest! {
    #[test]
    fn renderers_agree_on_sections_and_order(plan in plan_strategy()) {
        let expected: Vec<String> = SECTION_ORDER
            .iter()
            .filter(|name| plan.section(**name).is_some_and(|c| !c.is_empty()))
            .map(|name| name.display_name().to_string())
            .collect();

        prop_assert_eq!(markdown_headings(&render_markdown(&plan)), expected.clone());
        prop_assert_eq!(pdf_headings(&plan), expected.clone());
        prop_assert_eq!(docx_headings(&plan), expected);
    }

    #[test]
    fn markdown_rendering_is_idempotent(plan in plan_strategy()) {
        prop_assert_eq!(render_markdown(&plan), render_markdown(&plan));
    }

    #[test]
    fn pdf_lines_never_cross_the_right_margin(
        title in "[A-Z0-9W@ ]{1,120}",
        items in prop::collection::vec("[A-Za-z0-9@%Wm ]{0,200}", 1..4),
    ) {
        let plan = LessonPlan::new(title).with_section(SectionName::Materials, items);
        let layout = PdfLayout::build(&plan, &mut Sanitizer::new(Charset::WinAnsi), FontMetrics::Helvetica);
        let limit = PAGE_WIDTH_PT - MARGIN_PT;

        for line in layout.lines() {
            let right = line.x + FontMetrics::Helvetica.text_width(&line.text, line.style);
            prop_assert!(right <= limit + 0.01, "{:?} ends at {}", line.text, right);
        }
    }
}
