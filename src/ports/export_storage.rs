//! Export Storage Port - Persisting exported documents.
//!
//! Exports are built fully in memory and handed to this port as one blob.
//! Implementations must make the write complete-or-fail: a reader never sees
//! a partially written file.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::ExportedDocument;

/// Port for persisting exported documents.
#[async_trait]
pub trait ExportStorage: Send + Sync {
    /// Writes the document under its suggested filename and returns the
    /// final path.
    async fn save(&self, document: &ExportedDocument) -> Result<PathBuf, StorageError>;
}

/// Errors that can occur during file storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// The suggested filename would escape the export directory.
    #[error("Invalid filename: {filename}")]
    InvalidFilename { filename: String },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an invalid filename error.
    pub fn invalid_filename(filename: impl Into<String>) -> Self {
        Self::InvalidFilename {
            filename: filename.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(err.to_string())
            }
            _ => StorageError::io(err.to_string()),
        }
    }
}
