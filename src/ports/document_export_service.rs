//! Document Export Service Port - Format conversion interface.
//!
//! This port defines the contract for rendering a [`LessonPlan`] into
//! Markdown, PDF and DOCX. Every implementation walks the plan through
//! [`LessonPlan::ordered_sections`], so the three outputs always agree on
//! which sections appear and in what order.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::lesson::LessonPlan;

/// Port for rendering lesson plans to downloadable formats.
///
/// # Contract
///
/// Implementations must:
/// - Render sections in `SECTION_ORDER`, skipping empty ones
/// - Treat characters the target cannot encode as a soft loss, reported as
///   `ExportWarning::EncodingLossy`, never as an error
/// - Be deterministic for Markdown output
///
/// # Usage
///
/// ```rust,ignore
/// let service: &dyn DocumentExportService = get_service();
///
/// let markdown = service.to_markdown(&plan);
/// let pdf = service.to_pdf(&plan)?;
/// std::fs::write("plan.pdf", &pdf.bytes)?;
/// ```
pub trait DocumentExportService: Send + Sync {
    /// Render the plan as Markdown text.
    fn to_markdown(&self, plan: &LessonPlan) -> String;

    /// Render the plan as a PDF document.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the PDF library fails to build or
    /// serialize the document.
    fn to_pdf(&self, plan: &LessonPlan) -> Result<RenderedBytes, ExportError>;

    /// Render the plan as a DOCX document.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if packing the document archive fails.
    fn to_docx(&self, plan: &LessonPlan) -> Result<RenderedBytes, ExportError>;

    /// Render the plan in the requested format.
    fn render(&self, plan: &LessonPlan, format: ExportFormat) -> Result<RenderedBytes, ExportError> {
        match format {
            ExportFormat::Markdown => Ok(RenderedBytes::new(self.to_markdown(plan).into_bytes())),
            ExportFormat::Pdf => self.to_pdf(plan),
            ExportFormat::Docx => self.to_docx(plan),
        }
    }
}

/// Bytes produced by a renderer plus any soft losses.
#[derive(Debug, Clone, Default)]
pub struct RenderedBytes {
    pub bytes: Vec<u8>,
    pub warnings: Vec<ExportWarning>,
}

impl RenderedBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            warnings: Vec::new(),
        }
    }

    /// Adds a warning unless it records no loss.
    pub fn with_warning(mut self, warning: Option<ExportWarning>) -> Self {
        self.warnings.extend(warning);
        self
    }
}

/// Soft export problem. The document is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExportWarning {
    /// Characters were transliterated or dropped to fit the output encoding.
    #[error("{format}: {dropped} character(s) dropped, {substituted} substituted")]
    EncodingLossy {
        format: ExportFormat,
        dropped: usize,
        substituted: usize,
    },
}

/// Export formats supported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Markdown text.
    Markdown,
    /// PDF document.
    Pdf,
    /// Word document.
    Docx,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Docx => write!(f, "docx"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// How exported files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `{topic}_lesson_plan`
    Topic,
    /// `{subject}_{topic}_{YYYYmmdd_HHMM}`
    #[default]
    Timestamped,
}

impl FileNaming {
    /// Builds the base filename (no extension).
    pub fn base_name(&self, subject: &str, topic: &str, now: DateTime<Local>) -> String {
        match self {
            FileNaming::Topic => format!("{}_lesson_plan", filename_safe(topic)),
            FileNaming::Timestamped => format!(
                "{}_{}_{}",
                filename_safe(subject),
                filename_safe(topic),
                now.format("%Y%m%d_%H%M")
            ),
        }
    }
}

/// Replaces whitespace and path separators with `_`.
pub fn filename_safe(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "lesson".to_string()
    } else {
        cleaned
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
    /// Soft losses reported by the renderer.
    pub warnings: Vec<ExportWarning>,
}

impl ExportedDocument {
    /// Create a new exported document.
    pub fn new(rendered: RenderedBytes, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content: rendered.bytes,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
            warnings: rendered.warnings,
        }
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// Building the PDF failed.
    #[error("PDF rendering failed: {0}")]
    PdfRenderingFailed(String),

    /// Building the DOCX failed.
    #[error("DOCX rendering failed: {0}")]
    DocxRenderingFailed(String),

    /// A configured font could not be loaded.
    #[error("Font unavailable: {0}")]
    FontUnavailable(String),
}

impl ExportError {
    /// Create a PDF rendering error.
    pub fn pdf_failed(reason: impl Into<String>) -> Self {
        Self::PdfRenderingFailed(reason.into())
    }

    /// Create a DOCX rendering error.
    pub fn docx_failed(reason: impl Into<String>) -> Self {
        Self::DocxRenderingFailed(reason.into())
    }

    /// Create a font error.
    pub fn font_unavailable(reason: impl Into<String>) -> Self {
        Self::FontUnavailable(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
