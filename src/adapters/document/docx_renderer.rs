//! DOCX rendering of lesson plans with docx-rs.
//!
//! Like the PDF path, the plan is first flattened into [`DocxBlock`]s and
//! only then turned into a Word document.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, RunFonts, SpecialIndentType, Start, Style, StyleType,
};

use super::sanitize::{Charset, Sanitizer};
use crate::domain::lesson::{LessonPlan, SectionContent};
use crate::ports::{ExportError, ExportFormat, RenderedBytes};

const DEFAULT_FONT: &str = "Calibri";
/// Half-points, so 11pt.
const DEFAULT_SIZE: usize = 22;
const HEADING_1: &str = "Heading1";
const HEADING_2: &str = "Heading2";
const BULLET_NUMBERING_ID: usize = 1;

/// One paragraph of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxBlock {
    Title(String),
    SectionHeading(String),
    Bullet(String),
    /// Body text; each entry is a line, joined with line breaks.
    Body(Vec<String>),
}

/// Flattens a plan into paragraphs, cleaning text through `sanitizer`.
pub fn docx_blocks(plan: &LessonPlan, sanitizer: &mut Sanitizer) -> Vec<DocxBlock> {
    let mut blocks = vec![DocxBlock::Title(sanitizer.clean(plan.title()))];

    for (name, content) in plan.ordered_sections() {
        blocks.push(DocxBlock::SectionHeading(name.display_name().to_string()));
        match content {
            SectionContent::Items(items) => {
                blocks.extend(items.iter().map(|item| DocxBlock::Bullet(sanitizer.clean(item))));
            }
            SectionContent::Text(text) => {
                let text = sanitizer.clean(text);
                blocks.push(DocxBlock::Body(text.lines().map(str::to_string).collect()));
            }
        }
    }

    blocks
}

/// DOCX renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, plan: &LessonPlan) -> Result<RenderedBytes, ExportError> {
        let mut sanitizer = Sanitizer::new(Charset::Unicode);
        let blocks = docx_blocks(plan, &mut sanitizer);

        let docx = blocks
            .iter()
            .fold(base_document(), |docx, block| docx.add_paragraph(paragraph(block)));

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| ExportError::docx_failed(e.to_string()))?;
        let bytes = buffer.into_inner();

        tracing::debug!(
            paragraphs = blocks.len(),
            bytes = bytes.len(),
            "Rendered lesson plan DOCX"
        );

        Ok(RenderedBytes::new(bytes)
            .with_warning(sanitizer.report().into_warning(ExportFormat::Docx)))
    }
}

fn base_document() -> Docx {
    let bullet_level = Level::new(
        0,
        Start::new(1),
        NumberFormat::new("bullet"),
        LevelText::new("•"),
        LevelJc::new("left"),
    )
    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None);

    Docx::new()
        .default_fonts(
            RunFonts::new()
                .ascii(DEFAULT_FONT)
                .hi_ansi(DEFAULT_FONT)
                .cs(DEFAULT_FONT),
        )
        .default_size(DEFAULT_SIZE)
        .add_style(
            Style::new(HEADING_1, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new(HEADING_2, StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        )
        .add_abstract_numbering(AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet_level))
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn paragraph(block: &DocxBlock) -> Paragraph {
    match block {
        DocxBlock::Title(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()))
            .style(HEADING_1),
        DocxBlock::SectionHeading(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()))
            .style(HEADING_2),
        DocxBlock::Bullet(text) => Paragraph::new()
            .add_run(Run::new().add_text(text.as_str()))
            .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        DocxBlock::Body(lines) => {
            let run = lines.iter().enumerate().fold(Run::new(), |run, (idx, line)| {
                let run = if idx > 0 {
                    run.add_break(BreakType::TextWrapping)
                } else {
                    run
                };
                run.add_text(line.as_str())
            });
            Paragraph::new().add_run(run)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
