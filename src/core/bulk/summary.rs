//! Bulk operation summaries
//!
//! This module defines structures for tracking and reporting the outcome of
//! export, import and delete batches.

use crate::domain::{ExportDocument, RecordFailure, RecordId};
use std::time::Duration;

/// Result of an export: the document plus selection counts
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// The assembled document
    pub document: ExportDocument,

    /// Number of distinct ids requested (equals `located` for export-all)
    pub requested: usize,

    /// Number of records found and included
    pub located: usize,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportOutcome {
    /// Create an outcome for `document`, counting its records as located
    pub fn new(document: ExportDocument, requested: usize) -> Self {
        let located = document.len();
        Self {
            document,
            requested,
            located,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Requested ids that were not found
    pub fn skipped(&self) -> usize {
        self.requested.saturating_sub(self.located)
    }

    /// Log the outcome
    pub fn log_summary(&self) {
        crate::log_bulk_complete!("export", self.located, self.skipped(), self.duration);
    }
}

/// Summary of an import batch
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    /// Records persisted
    pub success_count: usize,

    /// Entries that failed
    pub error_count: usize,

    /// Ids assigned to the persisted records, in document order
    pub imported_ids: Vec<RecordId>,

    /// Failure detail for each failed entry
    pub failures: Vec<RecordFailure>,

    /// Duration of the import
    pub duration: Duration,
}

impl ImportSummary {
    /// Create a new empty import summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a persisted entry
    pub fn add_success(&mut self, id: RecordId) {
        self.success_count += 1;
        self.imported_ids.push(id);
    }

    /// Record a failed entry
    pub fn add_failure(&mut self, failure: RecordFailure) {
        self.error_count += 1;
        self.failures.push(failure);
    }

    /// Number of entries processed
    pub fn total(&self) -> usize {
        self.success_count + self.error_count
    }

    /// Check if every entry was imported
    pub fn is_successful(&self) -> bool {
        self.error_count == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_bulk_complete!("import", self.success_count, self.error_count, self.duration);

        if !self.failures.is_empty() {
            tracing::warn!(
                error_count = self.error_count,
                "Import completed with errors"
            );
        }
    }
}

/// Summary of a delete batch
#[derive(Debug, Clone, Default)]
pub struct DeleteSummary {
    /// Number of delete calls issued (distinct ids)
    pub issued: usize,

    /// Deletes that returned an error
    pub failures: Vec<RecordFailure>,

    /// Duration of the batch
    pub duration: Duration,
}

impl DeleteSummary {
    /// Create a new empty delete summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a failed delete
    pub fn add_failure(&mut self, failure: RecordFailure) {
        self.failures.push(failure);
    }

    /// Deletes that completed without error
    pub fn succeeded(&self) -> usize {
        self.issued.saturating_sub(self.failures.len())
    }

    /// Check if every delete succeeded
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_bulk_complete!("delete", self.succeeded(), self.failures.len(), self.duration);
    }
}
