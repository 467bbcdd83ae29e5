//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Pipeline Ports
//!
//! - `AIProvider` - The single model call
//! - `ResponseInterpreter` - Raw model text to `LessonPlan`
//! - `DocumentExportService` - `LessonPlan` to Markdown, PDF and DOCX
//! - `ExportStorage` - Atomic persistence of exported files

mod ai_provider;
mod document_export_service;
mod export_storage;
mod response_interpreter;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use document_export_service::{
    filename_safe, DocumentExportService, ExportError, ExportFormat, ExportWarning,
    ExportedDocument, FileNaming, RenderedBytes,
};
pub use export_storage::{ExportStorage, StorageError};
pub use response_interpreter::{
    InterpretError, InterpretWarning, InterpretedResponse, Interpretation, InterpreterFactory,
    ResponseInterpreter,
};
