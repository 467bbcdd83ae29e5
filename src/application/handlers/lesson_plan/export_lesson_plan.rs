//! ExportLessonPlanHandler - Renders a plan into a downloadable document.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::domain::lesson::LessonPlan;
use crate::ports::{
    DocumentExportService, ExportError, ExportFormat, ExportStorage, ExportedDocument, FileNaming,
    StorageError,
};

/// Command to export a lesson plan.
#[derive(Debug, Clone)]
pub struct ExportLessonPlanCommand {
    pub plan: LessonPlan,
    pub format: ExportFormat,
    /// Subject and topic feed the suggested filename.
    pub subject: String,
    pub topic: String,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportLessonPlanResult {
    pub document: ExportedDocument,
    /// Where the document was stored, when storage is configured.
    pub saved_to: Option<PathBuf>,
}

/// Errors from lesson plan export.
#[derive(Debug, thiserror::Error)]
pub enum ExportLessonPlanError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Handler for exporting lesson plans.
pub struct ExportLessonPlanHandler {
    exporter: Arc<dyn DocumentExportService>,
    storage: Option<Arc<dyn ExportStorage>>,
    naming: FileNaming,
}

impl ExportLessonPlanHandler {
    pub fn new(exporter: Arc<dyn DocumentExportService>) -> Self {
        Self {
            exporter,
            storage: None,
            naming: FileNaming::default(),
        }
    }

    /// Also persist every export.
    pub fn with_storage(mut self, storage: Arc<dyn ExportStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_naming(mut self, naming: FileNaming) -> Self {
        self.naming = naming;
        self
    }

    pub async fn handle(
        &self,
        cmd: ExportLessonPlanCommand,
    ) -> Result<ExportLessonPlanResult, ExportLessonPlanError> {
        self.handle_at(cmd, Local::now()).await
    }

    /// Exports with an explicit clock reading for the filename.
    pub async fn handle_at(
        &self,
        cmd: ExportLessonPlanCommand,
        now: DateTime<Local>,
    ) -> Result<ExportLessonPlanResult, ExportLessonPlanError> {
        let rendered = self.exporter.render(&cmd.plan, cmd.format)?;
        let base_name = self.naming.base_name(&cmd.subject, &cmd.topic, now);
        let document = ExportedDocument::new(rendered, cmd.format, &base_name);

        tracing::info!(
            format = %cmd.format,
            filename = %document.filename,
            bytes = document.content.len(),
            warnings = document.warnings.len(),
            "Exported lesson plan"
        );

        let saved_to = match &self.storage {
            Some(storage) => Some(storage.save(&document).await?),
            None => None,
        };

        Ok(ExportLessonPlanResult { document, saved_to })
    }
}
