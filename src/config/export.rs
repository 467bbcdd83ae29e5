//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::ports::FileNaming;

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory exported documents are saved to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Save each export to `output_dir` as well as returning it
    #[serde(default)]
    pub save_to_disk: bool,

    /// TrueType font embedded in PDFs for body text
    pub pdf_font_path: Option<PathBuf>,

    /// TrueType font for PDF titles and headings
    pub pdf_bold_font_path: Option<PathBuf>,

    /// How export filenames are built
    #[serde(default)]
    pub naming: FileNaming,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("EXPORT__OUTPUT_DIR"));
        }
        if self.pdf_bold_font_path.is_some() && self.pdf_font_path.is_none() {
            return Err(ValidationError::BoldFontWithoutRegular);
        }
        for path in self.pdf_font_path.iter().chain(&self.pdf_bold_font_path) {
            if !path.is_file() {
                return Err(ValidationError::FontNotFound(path.display().to_string()));
            }
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            save_to_disk: false,
            pdf_font_path: None,
            pdf_bold_font_path: None,
            naming: FileNaming::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}
