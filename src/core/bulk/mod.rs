//! Bulk operations
//!
//! Export, import and delete across many records with partial-success
//! semantics, plus the export document file helpers.

pub mod coordinator;
pub mod document;
pub mod summary;

pub use coordinator::BulkCoordinator;
pub use document::{default_export_file_name, load_document, save_document};
pub use summary::{DeleteSummary, ExportOutcome, ImportSummary};
