//! Bulk coordinator - export, import and delete across many records
//!
//! Every batch is best-effort: a per-record failure is recorded in the
//! summary and the batch continues. Only whole-input problems (empty
//! selection, malformed document) and store failures during export abort.

use crate::core::bulk::summary::{DeleteSummary, ExportOutcome, ImportSummary};
use crate::core::catalog::CatalogStore;
use crate::domain::document::EXPORT_FORMAT_VERSION;
use crate::domain::{CoupeError, ExportDocument, NewRecord, RecordFailure, RecordId, Result};
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::time::Instant;

/// Fields owned by the store that imports never carry over
const IDENTITY_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Bulk operations over a [`CatalogStore`]
#[derive(Clone)]
pub struct BulkCoordinator {
    store: CatalogStore,
}

impl BulkCoordinator {
    /// Create a new coordinator over `store`
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Export the selected records
    ///
    /// Duplicate ids are collapsed and ids with no record are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::EmptySelection` if `ids` is empty, or the store
    /// error if a lookup fails.
    pub async fn export_subset(&self, ids: &[RecordId]) -> Result<ExportOutcome> {
        if ids.is_empty() {
            return Err(CoupeError::EmptySelection);
        }

        let start_time = Instant::now();
        let ids = distinct(ids);
        crate::log_bulk_start!("export", ids.len());

        let mut records = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.store.get(*id).await? {
                Some(record) => records.push(record),
                None => tracing::debug!(record_id = %id, "Selected record not found, skipping"),
            }
        }

        let outcome = ExportOutcome::new(ExportDocument::new(records, Utc::now()), ids.len())
            .with_duration(start_time.elapsed());
        outcome.log_summary();
        Ok(outcome)
    }

    /// Export every record in the catalog
    ///
    /// An empty catalog yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns the store error if the catalog cannot be read.
    pub async fn export_all(&self) -> Result<ExportOutcome> {
        let start_time = Instant::now();
        let records = self.store.get_all().await?;
        crate::log_bulk_start!("export", records.len());

        let requested = records.len();
        let outcome = ExportOutcome::new(ExportDocument::new(records, Utc::now()), requested)
            .with_duration(start_time.elapsed());
        outcome.log_summary();
        Ok(outcome)
    }

    /// Import the records of an untyped export document
    ///
    /// Each entry is stored as a new record with a fresh id; `id`,
    /// `createdAt` and `updatedAt` in the document are ignored. Entries that
    /// fail are counted and recorded, and the import continues.
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::MalformedDocument` if the document is not an
    /// object with a `records` array. Nothing is written in that case.
    pub async fn import_document(&self, document: &Value) -> Result<ImportSummary> {
        let entries = document_records(document)?;

        let start_time = Instant::now();
        let mut summary = ImportSummary::new();
        crate::log_bulk_start!("import", entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let outcome = match new_record_from_entry(entry) {
                Ok(record) => self.store.add(record).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(id) => {
                    tracing::debug!(index, record_id = %id, "Record imported");
                    summary.add_success(id);
                }
                Err(e) => {
                    crate::log_record_failure!("import", index, &e);
                    summary.add_failure(RecordFailure::new(index, e.to_string()));
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Import a typed export document
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::Serialization` if the document cannot be
    /// converted to JSON.
    pub async fn import(&self, document: &ExportDocument) -> Result<ImportSummary> {
        let value = serde_json::to_value(document)?;
        self.import_document(&value).await
    }

    /// Delete the selected records
    ///
    /// Duplicate ids are collapsed. Ids with no record count as issued
    /// deletes. A failing delete is recorded and the batch continues.
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::EmptySelection` if `ids` is empty.
    pub async fn delete_subset(&self, ids: &[RecordId]) -> Result<DeleteSummary> {
        if ids.is_empty() {
            return Err(CoupeError::EmptySelection);
        }

        let start_time = Instant::now();
        let ids = distinct(ids);
        let mut summary = DeleteSummary::new();
        crate::log_bulk_start!("delete", ids.len());

        for (index, id) in ids.iter().enumerate() {
            summary.issued += 1;
            if let Err(e) = self.store.delete(*id).await {
                crate::log_record_failure!("delete", index, &e);
                summary.add_failure(RecordFailure::new(index, e.to_string()).with_record_id(*id));
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}

/// Ids in first-occurrence order without repeats
fn distinct(ids: &[RecordId]) -> Vec<RecordId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Validates the document envelope and returns its entries
fn document_records(document: &Value) -> Result<&Vec<Value>> {
    let object = document.as_object().ok_or_else(|| {
        CoupeError::MalformedDocument("document must be a JSON object".to_string())
    })?;

    let records = match object.get("records") {
        Some(Value::Array(records)) => records,
        Some(_) => {
            return Err(CoupeError::MalformedDocument(
                "'records' must be an array".to_string(),
            ))
        }
        None => {
            return Err(CoupeError::MalformedDocument(
                "missing 'records' array".to_string(),
            ))
        }
    };

    match object.get("version").and_then(Value::as_str) {
        Some(EXPORT_FORMAT_VERSION) => {}
        version => tracing::warn!(
            version = ?version,
            expected = EXPORT_FORMAT_VERSION,
            "Unexpected document version, importing anyway"
        ),
    }

    Ok(records)
}

/// Turns one document entry into a validated new record
fn new_record_from_entry(entry: &Value) -> Result<NewRecord> {
    let fields = entry
        .as_object()
        .ok_or_else(|| CoupeError::Validation("entry must be a JSON object".to_string()))?;

    let stripped: Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| !IDENTITY_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let record: NewRecord = serde_json::from_value(Value::Object(stripped))
        .map_err(|e| CoupeError::Validation(format!("invalid record: {}", e)))?;

    record.validate().map_err(CoupeError::Validation)?;
    Ok(record)
}
