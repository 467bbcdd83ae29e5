//! Document adapters - Rendering and storing exported lesson plans.
//!
//! This module provides adapters for the document-related ports:
//! - `LessonPlanExportService` - Markdown, PDF and DOCX rendering
//! - `LocalExportStorage` - Stores exports on the local filesystem

mod docx_renderer;
mod export_service;
mod font_metrics;
mod local_export_storage;
mod markdown_renderer;
mod pdf_renderer;
mod sanitize;

pub use docx_renderer::{docx_blocks, DocxBlock, DocxRenderer};
pub use export_service::LessonPlanExportService;
pub use font_metrics::{FontMetrics, LoadedFont};
pub use local_export_storage::LocalExportStorage;
pub use markdown_renderer::render_markdown;
pub use pdf_renderer::{
    wrap_text, PdfFontPaths, PdfLayout, PdfLine, PdfPage, PdfRenderer, TextStyle,
    BOTTOM_LIMIT_PT, LINE_ADVANCE_PT, MARGIN_PT, PAGE_HEIGHT_PT, PAGE_WIDTH_PT, SECTION_GAP_PT,
};
pub use sanitize::{is_winansi, Charset, SanitizeReport, Sanitizer};
