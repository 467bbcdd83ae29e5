//! Lesson plan export service adapter.
//!
//! Bundles the three renderers behind the `DocumentExportService` port.

use crate::domain::lesson::LessonPlan;
use crate::ports::{DocumentExportService, ExportError, RenderedBytes};

use super::docx_renderer::DocxRenderer;
use super::markdown_renderer::render_markdown;
use super::pdf_renderer::{PdfFontPaths, PdfRenderer};

/// Export service rendering Markdown, PDF (printpdf) and DOCX (docx-rs).
///
/// # Example
///
/// ```rust,ignore
/// let service = LessonPlanExportService::new();
///
/// let markdown = service.to_markdown(&plan);
/// let pdf = service.to_pdf(&plan)?;
/// for warning in &pdf.warnings {
///     println!("{}", warning);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LessonPlanExportService {
    pdf: PdfRenderer,
    docx: DocxRenderer,
}

impl LessonPlanExportService {
    /// Create a service using the built-in PDF fonts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Embed TrueType fonts in PDFs so non-Latin text survives.
    pub fn with_pdf_fonts(mut self, fonts: PdfFontPaths) -> Self {
        self.pdf = self.pdf.with_fonts(fonts);
        self
    }
}

impl DocumentExportService for LessonPlanExportService {
    fn to_markdown(&self, plan: &LessonPlan) -> String {
        render_markdown(plan)
    }

    fn to_pdf(&self, plan: &LessonPlan) -> Result<RenderedBytes, ExportError> {
        self.pdf.render(plan)
    }

    fn to_docx(&self, plan: &LessonPlan) -> Result<RenderedBytes, ExportError> {
        self.docx.render(plan)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
