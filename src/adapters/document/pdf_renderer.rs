//! PDF rendering of lesson plans with printpdf.
//!
//! Rendering is split in two steps. [`PdfLayout::build`] computes every
//! line's page, position and style in PDF points; [`PdfRenderer`] then only
//! draws that model. Pagination and wrapping are tested on the model
//! without parsing PDF bytes.

use std::path::PathBuf;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use super::font_metrics::{FontMetrics, LoadedFont};
use super::sanitize::{Charset, Sanitizer};
use crate::domain::lesson::{LessonPlan, SectionContent};
use crate::ports::{ExportError, ExportFormat, RenderedBytes};

/// A4 width in points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
/// A4 height in points.
pub const PAGE_HEIGHT_PT: f32 = 841.89;
/// Left, right and top margin.
pub const MARGIN_PT: f32 = 40.0;
/// A new page starts when the cursor drops below this.
pub const BOTTOM_LIMIT_PT: f32 = 60.0;
/// Baseline advance per line.
pub const LINE_ADVANCE_PT: f32 = 16.0;
/// Extra space after each section.
pub const SECTION_GAP_PT: f32 = 4.0;

const BULLET: &str = "• ";
/// Continuation lines of a list item align after the bullet.
const BULLET_INDENT_PT: f32 = 10.0;
const MM_PER_PT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Layer 1";

/// Font role of a laid-out line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Title,
    Heading,
    Body,
}

impl TextStyle {
    pub fn font_size(&self) -> f32 {
        match self {
            TextStyle::Title => 16.0,
            TextStyle::Heading => 12.0,
            TextStyle::Body => 11.0,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, TextStyle::Title | TextStyle::Heading)
    }
}

/// One positioned line. Coordinates are points from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub text: String,
    pub style: TextStyle,
    pub x: f32,
    pub y: f32,
}

/// Lines of one page, top to bottom.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub lines: Vec<PdfLine>,
}

/// Fully positioned document.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub title: String,
    pub pages: Vec<PdfPage>,
}

impl PdfLayout {
    /// Lays out a plan. All text passes through `sanitizer` first and is
    /// wrapped on the advance widths in `metrics`.
    pub fn build(plan: &LessonPlan, sanitizer: &mut Sanitizer, metrics: FontMetrics<'_>) -> Self {
        let title = sanitizer.clean(plan.title());
        let mut cursor = Cursor::new(metrics);

        cursor.write_wrapped(&title, "", TextStyle::Title, 0.0);

        for (name, content) in plan.ordered_sections() {
            cursor.write_wrapped(name.display_name(), "", TextStyle::Heading, 0.0);

            match content {
                SectionContent::Items(items) => {
                    for item in items {
                        let item = sanitizer.clean(item);
                        cursor.write_wrapped(&item, BULLET, TextStyle::Body, BULLET_INDENT_PT);
                    }
                }
                SectionContent::Text(text) => {
                    let text = sanitizer.clean(text);
                    for paragraph in text.lines() {
                        cursor.write_wrapped(paragraph, "", TextStyle::Body, 0.0);
                    }
                }
            }

            cursor.y -= SECTION_GAP_PT;
        }

        PdfLayout {
            title,
            pages: cursor.finish(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PdfLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Vertical write cursor with page breaking.
struct Cursor<'m> {
    metrics: FontMetrics<'m>,
    pages: Vec<PdfPage>,
    current: PdfPage,
    y: f32,
}

impl<'m> Cursor<'m> {
    fn new(metrics: FontMetrics<'m>) -> Self {
        Self {
            metrics,
            pages: Vec::new(),
            current: PdfPage::default(),
            y: PAGE_HEIGHT_PT - MARGIN_PT,
        }
    }

    fn write_line(&mut self, text: String, style: TextStyle, indent: f32) {
        if self.y < BOTTOM_LIMIT_PT {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = PAGE_HEIGHT_PT - MARGIN_PT;
        }

        self.current.lines.push(PdfLine {
            text,
            style,
            x: MARGIN_PT + indent,
            y: self.y,
        });
        self.y -= LINE_ADVANCE_PT;
    }

    /// Wraps `prefix` followed by `text` to the printable width. The first
    /// line starts at the margin, continuation lines at `rest_indent`.
    fn write_wrapped(&mut self, text: &str, prefix: &str, style: TextStyle, rest_indent: f32) {
        let printable = PAGE_WIDTH_PT - 2.0 * MARGIN_PT;
        let metrics = self.metrics;
        let lines = wrap_text(text, prefix, printable, printable - rest_indent, |c| {
            metrics.char_width(c, style)
        });

        for (idx, line) in lines.into_iter().enumerate() {
            let indent = if idx == 0 { 0.0 } else { rest_indent };
            self.write_line(line, style, indent);
        }
    }

    fn finish(mut self) -> Vec<PdfPage> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Greedy word wrap on measured widths.
///
/// `prefix` opens the first line and is never left on a line by itself:
/// when the first word does not fit beside it, the word is split there.
/// Words wider than a whole line are split by characters. An empty input
/// yields one line holding the trimmed prefix.
pub fn wrap_text<F>(
    text: &str,
    prefix: &str,
    first_width: f32,
    rest_width: f32,
    char_width: F,
) -> Vec<String>
where
    F: Fn(char) -> f32,
{
    let measure = |s: &str| -> f32 { s.chars().map(&char_width).sum() };
    let space = char_width(' ');

    let mut lines: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut current_width = measure(prefix);
    let mut has_words = false;

    for word in text.split_whitespace() {
        let mut rest = word;

        while !rest.is_empty() {
            let limit = if lines.is_empty() { first_width } else { rest_width };
            let gap = if has_words { space } else { 0.0 };
            let rest_width_pt = measure(rest);

            if current_width + gap + rest_width_pt <= limit {
                if has_words {
                    current.push(' ');
                }
                current.push_str(rest);
                current_width += gap + rest_width_pt;
                has_words = true;
                break;
            }

            if has_words {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
                has_words = false;
                continue;
            }

            let (head, tail) = split_to_fit(rest, limit - current_width, &char_width);
            current.push_str(head);
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
            rest = tail;
        }
    }

    if has_words || lines.is_empty() {
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Splits off the longest head of `word` no wider than `room`. The head
/// always keeps at least one character so wrapping makes progress.
fn split_to_fit<'w, F>(word: &'w str, room: f32, char_width: &F) -> (&'w str, &'w str)
where
    F: Fn(char) -> f32,
{
    let mut used = 0.0;
    let mut end = 0;

    for (idx, c) in word.char_indices() {
        let width = char_width(c);
        if end > 0 && used + width > room {
            break;
        }
        used += width;
        end = idx + c.len_utf8();
    }

    word.split_at(end)
}

/// TrueType fonts to embed instead of the built-in Helvetica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFontPaths {
    pub regular: PathBuf,
    pub bold: Option<PathBuf>,
}

/// Embedded faces, read once per render for measuring and drawing.
struct EmbeddedFonts {
    regular: LoadedFont,
    bold: Option<LoadedFont>,
}

impl EmbeddedFonts {
    fn load(paths: &PdfFontPaths) -> Result<Self, ExportError> {
        Ok(Self {
            regular: LoadedFont::load(&paths.regular)?,
            bold: paths.bold.as_deref().map(LoadedFont::load).transpose()?,
        })
    }

    fn metrics(&self) -> FontMetrics<'_> {
        FontMetrics::Embedded {
            regular: &self.regular,
            bold: self.bold.as_ref().unwrap_or(&self.regular),
        }
    }
}

/// PDF renderer.
///
/// With no font paths the built-in Helvetica faces are used and text is
/// restricted to Windows-1252. With a TrueType font configured, text is
/// kept as Unicode.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    fonts: Option<PdfFontPaths>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embeds the given TrueType fonts. The regular face doubles as bold
    /// when no bold face is given.
    pub fn with_fonts(mut self, fonts: PdfFontPaths) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Charset the configured fonts can represent.
    pub fn charset(&self) -> Charset {
        if self.fonts.is_some() {
            Charset::Unicode
        } else {
            Charset::WinAnsi
        }
    }

    pub fn render(&self, plan: &LessonPlan) -> Result<RenderedBytes, ExportError> {
        let embedded = self.fonts.as_ref().map(EmbeddedFonts::load).transpose()?;
        let metrics = embedded
            .as_ref()
            .map_or(FontMetrics::Helvetica, |fonts| fonts.metrics());

        let mut sanitizer = Sanitizer::new(self.charset());
        let layout = PdfLayout::build(plan, &mut sanitizer, metrics);
        let bytes = draw(&layout, embedded.as_ref())?;

        tracing::debug!(
            pages = layout.page_count(),
            bytes = bytes.len(),
            "Rendered lesson plan PDF"
        );

        Ok(RenderedBytes::new(bytes)
            .with_warning(sanitizer.report().into_warning(ExportFormat::Pdf)))
    }
}

fn draw(layout: &PdfLayout, embedded: Option<&EmbeddedFonts>) -> Result<Vec<u8>, ExportError> {
    let width = Mm(PAGE_WIDTH_PT * MM_PER_PT);
    let height = Mm(PAGE_HEIGHT_PT * MM_PER_PT);

    let (doc, first_page, first_layer) =
        PdfDocument::new(layout.title.as_str(), width, height, LAYER_NAME);
    let (regular, bold) = add_fonts(&doc, embedded)?;

    for (idx, page) in layout.pages.iter().enumerate() {
        let layer = if idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(width, height, LAYER_NAME);
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        for line in page.lines.iter().filter(|l| !l.text.is_empty()) {
            let font = if line.style.is_bold() { &bold } else { &regular };
            layer.use_text(
                line.text.as_str(),
                line.style.font_size(),
                Mm(line.x * MM_PER_PT),
                Mm(line.y * MM_PER_PT),
                font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| ExportError::pdf_failed(e.to_string()))
}

fn add_fonts(
    doc: &PdfDocumentReference,
    embedded: Option<&EmbeddedFonts>,
) -> Result<(IndirectFontRef, IndirectFontRef), ExportError> {
    match embedded {
        None => {
            let regular = doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ExportError::pdf_failed(e.to_string()))?;
            let bold = doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ExportError::pdf_failed(e.to_string()))?;
            Ok((regular, bold))
        }
        Some(fonts) => {
            let regular = embed_font(doc, &fonts.regular)?;
            let bold = match &fonts.bold {
                Some(font) => embed_font(doc, font)?,
                None => regular.clone(),
            };
            Ok((regular, bold))
        }
    }
}

fn embed_font(doc: &PdfDocumentReference, font: &LoadedFont) -> Result<IndirectFontRef, ExportError> {
    doc.add_external_font(font.bytes()).map_err(|e| {
        ExportError::font_unavailable(format!("{}: {}", font.path().display(), e))
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lesson::SectionName;

    fn layout(plan: &LessonPlan) -> PdfLayout {
        PdfLayout::build(plan, &mut Sanitizer::new(Charset::WinAnsi), FontMetrics::Helvetica)
    }

    fn unit(_: char) -> f32 {
        1.0
    }

    fn right_edge(line: &PdfLine) -> f32 {
        line.x + FontMetrics::Helvetica.text_width(&line.text, line.style)
    }

    fn assert_within_margin(layout: &PdfLayout) {
        let limit = PAGE_WIDTH_PT - MARGIN_PT;
        for line in layout.lines() {
            assert!(
                right_edge(line) <= limit + 0.01,
                "{:?} ends at {} past {}",
                line.text,
                right_edge(line),
                limit
            );
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Word wrap
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn wrap_text_packs_words_greedily() {
        assert_eq!(
            wrap_text("the quick brown fox", "", 10.0, 10.0, unit),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn wrap_text_splits_overlong_words() {
        assert_eq!(
            wrap_text("abcdefghij", "", 4.0, 4.0, unit),
            vec!["abcd", "efgh", "ij"]
        );
    }

    #[test]
    fn wrap_text_uses_rest_width_after_first_line() {
        assert_eq!(wrap_text("aa bb cc", "", 5.0, 2.0, unit), vec!["aa bb", "cc"]);
    }

    #[test]
    fn wrap_text_keeps_blank_paragraph_as_one_line() {
        assert_eq!(wrap_text("", "", 10.0, 10.0, unit), vec![String::new()]);
        assert_eq!(wrap_text("   ", "", 10.0, 10.0, unit), vec![String::new()]);
    }

    #[test]
    fn wrap_text_measures_each_character() {
        let width = |c: char| if c.is_ascii_uppercase() { 3.0 } else { 1.0 };

        assert_eq!(
            wrap_text("aaaa AA aaa", "", 10.0, 10.0, width),
            vec!["aaaa", "AA aaa"]
        );
    }

    #[test]
    fn wrap_text_splits_word_beside_prefix_instead_of_orphaning_it() {
        assert_eq!(
            wrap_text("abcdefgh", "* ", 5.0, 5.0, unit),
            vec!["* abc", "defgh"]
        );
    }

    #[test]
    fn wrap_text_moves_later_words_off_the_prefix_line() {
        assert_eq!(
            wrap_text("ab cdefg", "* ", 6.0, 6.0, unit),
            vec!["* ab", "cdefg"]
        );
    }

    #[test]
    fn wrap_text_with_prefix_and_no_text_keeps_prefix() {
        assert_eq!(wrap_text("", "* ", 10.0, 10.0, unit), vec!["*"]);
    }

    // ───────────────────────────────────────────────────────────────
    // Layout
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn layout_starts_at_top_margin_with_title_style() {
        let layout = layout(&LessonPlan::new("Fractions"));
        let first = layout.lines().next().unwrap();

        assert_eq!(first.text, "Fractions");
        assert_eq!(first.style, TextStyle::Title);
        assert_eq!(first.x, MARGIN_PT);
        assert_eq!(first.y, PAGE_HEIGHT_PT - MARGIN_PT);
    }

    #[test]
    fn layout_orders_sections_and_prefixes_bullets() {
        let plan = LessonPlan::new("T")
            .with_section(SectionName::Assessment, "Exit ticket")
            .with_section(SectionName::Materials, vec!["Chalk"]);

        let texts: Vec<_> = layout(&plan).lines().map(|l| l.text.clone()).collect();
        assert_eq!(
            texts,
            vec!["T", "Materials", "• Chalk", "Assessment", "Exit ticket"]
        );
    }

    #[test]
    fn layout_breaks_text_on_newlines() {
        let plan = LessonPlan::new("T").with_section(SectionName::LessonFlow, "One\n\nTwo");
        let texts: Vec<_> = layout(&plan).lines().map(|l| l.text.clone()).collect();
        assert_eq!(texts, vec!["T", "Lesson Flow", "One", "", "Two"]);
    }

    #[test]
    fn layout_advances_by_line_and_section_gap() {
        let plan = LessonPlan::new("T")
            .with_section(SectionName::Materials, vec!["a"])
            .with_section(SectionName::Assessment, "b");
        let ys: Vec<_> = layout(&plan).lines().map(|l| l.y).collect();

        let top = PAGE_HEIGHT_PT - MARGIN_PT;
        assert_eq!(ys[0], top);
        assert_eq!(ys[1], top - LINE_ADVANCE_PT);
        assert_eq!(ys[2], top - 2.0 * LINE_ADVANCE_PT);
        assert_eq!(ys[3], top - 3.0 * LINE_ADVANCE_PT - SECTION_GAP_PT);
    }

    #[test]
    fn long_items_wrap_with_hanging_indent() {
        let item = "word ".repeat(60);
        let plan = LessonPlan::new("T").with_section(SectionName::Materials, vec![item.as_str()]);
        let lines: Vec<_> = layout(&plan).lines().skip(2).cloned().collect();

        assert!(lines.len() > 1);
        assert!(lines[0].text.starts_with(BULLET));
        assert_eq!(lines[0].x, MARGIN_PT);
        assert_eq!(lines[1].x, MARGIN_PT + BULLET_INDENT_PT);
    }

    #[test]
    fn all_caps_title_stays_inside_right_margin() {
        let title = "PHOTOSYNTHESIS AND CELLULAR RESPIRATION IN GREEN PLANTS FOR GRADE SEVEN";
        let layout = layout(&LessonPlan::new(title));

        let titles: Vec<_> = layout
            .lines()
            .filter(|l| l.style == TextStyle::Title)
            .collect();
        assert!(titles.len() > 1);
        assert_within_margin(&layout);

        let rejoined: Vec<_> = titles.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), title);
    }

    #[test]
    fn digit_run_stays_inside_right_margin_with_bullet_attached() {
        let digits = "1234567890".repeat(12);
        let plan = LessonPlan::new("T").with_section(SectionName::Materials, vec![digits.as_str()]);
        let layout = layout(&plan);
        let body: Vec<_> = layout
            .lines()
            .filter(|l| l.style == TextStyle::Body)
            .collect();

        assert_within_margin(&layout);
        assert!(body[0].text.starts_with("• 1"));
        assert!(body.iter().all(|l| l.text.trim() != "•"));

        let joined: String = body.iter().map(|l| l.text.trim_start_matches(BULLET)).collect();
        assert_eq!(joined, digits);
    }

    #[test]
    fn wide_heading_text_wraps_inside_margin() {
        let plan = LessonPlan::new("T").with_section(
            SectionName::LessonFlow,
            "WWWWWWWWWW MMMMMMMMMM WWWWWWWWWW MMMMMMMMMM WWWWWWWWWW MMMMMMMMMM",
        );
        assert_within_margin(&layout(&plan));
    }

    #[test]
    fn overflow_starts_new_page_at_top_margin() {
        let items: Vec<String> = (0..120).map(|i| format!("Item {}", i)).collect();
        let plan = LessonPlan::new("T").with_section(SectionName::LessonFlow, items);
        let layout = layout(&plan);

        assert!(layout.page_count() >= 3);
        for page in &layout.pages {
            assert_eq!(page.lines[0].y, PAGE_HEIGHT_PT - MARGIN_PT);
            for line in &page.lines {
                assert!(line.y >= BOTTOM_LIMIT_PT - LINE_ADVANCE_PT);
            }
        }
        assert_eq!(layout.lines().count(), 122);
    }

    // ───────────────────────────────────────────────────────────────
    // Encoding
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn builtin_fonts_sanitize_and_report_loss() {
        let plan = LessonPlan::new("Plants 🌱").with_section(SectionName::Materials, vec!["x → y"]);
        let mut sanitizer = Sanitizer::new(PdfRenderer::new().charset());
        let layout = PdfLayout::build(&plan, &mut sanitizer, FontMetrics::Helvetica);

        assert_eq!(layout.title, "Plants ");
        assert!(layout.lines().any(|l| l.text == "• x -> y"));
        assert_eq!(sanitizer.report().dropped, 1);
        assert_eq!(sanitizer.report().substituted, 1);
    }

    #[test]
    fn configured_font_keeps_unicode() {
        let renderer = PdfRenderer::new().with_fonts(PdfFontPaths {
            regular: PathBuf::from("/fonts/NotoSans-Regular.ttf"),
            bold: None,
        });
        assert_eq!(renderer.charset(), Charset::Unicode);

        let mut sanitizer = Sanitizer::new(renderer.charset());
        let plan = LessonPlan::new("प्रकाश संश्लेषण");
        let layout = PdfLayout::build(&plan, &mut sanitizer, FontMetrics::Helvetica);

        assert_eq!(layout.title, "प्रकाश संश्लेषण");
        assert!(sanitizer.report().is_lossless());
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let renderer = PdfRenderer::new().with_fonts(PdfFontPaths {
            regular: PathBuf::from("/nonexistent/font.ttf"),
            bold: None,
        });
        let result = renderer.render(&LessonPlan::new("T"));
        assert!(matches!(result, Err(ExportError::FontUnavailable(_))));
    }

    // ───────────────────────────────────────────────────────────────
    // Output
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn render_produces_pdf_bytes() {
        let plan = LessonPlan::new("T").with_section(SectionName::Materials, vec!["Chalk"]);
        let rendered = PdfRenderer::new().render(&plan).unwrap();

        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert!(rendered.warnings.is_empty());
    }

    #[test]
    fn render_reports_encoding_loss() {
        let plan = LessonPlan::new("🌱 Plants");
        let rendered = PdfRenderer::new().render(&plan).unwrap();
        assert_eq!(rendered.warnings.len(), 1);
    }
}
