//! Export document model
//!
//! The export document is the transport format for moving records between
//! catalogs. It is written and read by the bulk coordinator and never stored
//! by the catalog itself.

use super::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format version written into every export
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Versioned snapshot of one or more records
///
/// ```json
/// {
///   "version": "1.0",
///   "exportDate": "2026-10-19T08:30:00Z",
///   "records": [ ... ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// Format version string
    pub version: String,

    /// When the snapshot was taken
    pub export_date: DateTime<Utc>,

    /// Exported records, with their ids and timestamps
    pub records: Vec<Record>,
}

impl ExportDocument {
    /// Creates a document at the current format version
    pub fn new(records: Vec<Record>, export_date: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION.to_string(),
            export_date,
            records,
        }
    }

    /// Number of records in the document
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the document carries no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
