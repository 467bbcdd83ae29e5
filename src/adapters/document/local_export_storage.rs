//! Local Filesystem Storage Adapter - Implementation of ExportStorage.
//!
//! Writes exported lesson plans into one flat directory.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{ExportStorage, ExportedDocument, StorageError};

/// Local filesystem storage for exported documents.
///
/// # Atomic Writes
///
/// Uses a write-to-temp-then-rename pattern:
/// 1. Write content to `.{filename}.{uuid}.tmp`, unique per save
/// 2. Sync to disk
/// 3. Rename to `{filename}`
///
/// If any step fails the temp file is removed, so the directory never holds
/// a partial export.
#[derive(Debug, Clone)]
pub struct LocalExportStorage {
    /// Directory all exports are written to.
    base_path: PathBuf,
}

impl LocalExportStorage {
    /// Creates a storage rooted at `base_path`. The directory is created on
    /// first write.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a suggested filename inside the base directory.
    fn target_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.base_path.join(name)),
            _ => Err(StorageError::invalid_filename(filename)),
        }
    }

    /// Hidden temp file next to the target. Concurrent saves of one
    /// filename each get their own.
    fn temp_path(&self, filename: &str) -> PathBuf {
        self.base_path
            .join(format!(".{}.{}.tmp", filename, Uuid::new_v4().simple()))
    }

    async fn write_atomically(
        &self,
        temp_path: &Path,
        final_path: &Path,
        content: &[u8],
    ) -> Result<(), StorageError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(content).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ExportStorage for LocalExportStorage {
    async fn save(&self, document: &ExportedDocument) -> Result<PathBuf, StorageError> {
        let final_path = self.target_path(&document.filename)?;
        let temp_path = self.temp_path(&document.filename);

        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create export directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        if let Err(err) = self
            .write_atomically(&temp_path, &final_path, &document.content)
            .await
        {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %temp_path.display(),
                        error = %cleanup,
                        "Failed to remove temp export file"
                    );
                }
            }
            return Err(err);
        }

        tracing::info!(
            path = %final_path.display(),
            bytes = document.content.len(),
            format = %document.format,
            "Saved export"
        );

        Ok(final_path)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
