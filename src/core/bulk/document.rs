//! Export document files
//!
//! Reading and writing export documents on disk.

use crate::domain::{CoupeError, ExportDocument, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// File name used when an export has no explicit output path
///
/// ```
/// use chrono::TimeZone;
/// use coupe::core::bulk::default_export_file_name;
///
/// let now = chrono::Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
/// assert_eq!(default_export_file_name(now), "coupe-export-2026-10-19.json");
/// ```
pub fn default_export_file_name(now: DateTime<Utc>) -> String {
    format!("coupe-export-{}.json", now.format("%Y-%m-%d"))
}

/// Write `document` as JSON, creating parent directories
///
/// # Errors
///
/// Returns `CoupeError::Io` if the file cannot be written.
pub async fn save_document(document: &ExportDocument, path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = if pretty {
        serde_json::to_vec_pretty(document)?
    } else {
        serde_json::to_vec(document)?
    };

    tokio::fs::write(path, json).await?;

    tracing::info!(
        path = %path.display(),
        records = document.len(),
        "Export document written"
    );
    Ok(())
}

/// Read a document file as untyped JSON
///
/// Structural checks are left to the import so that a bad entry fails only
/// that entry.
///
/// # Errors
///
/// Returns `CoupeError::Io` if the file cannot be read and
/// `CoupeError::MalformedDocument` if it is not valid JSON.
pub async fn load_document(path: &Path) -> Result<serde_json::Value> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CoupeError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        CoupeError::MalformedDocument(format!("{} is not valid JSON: {}", path.display(), e))
    })
}
