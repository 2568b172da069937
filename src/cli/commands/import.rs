//! Import command implementation
//!
//! Adds every record of an export document as a new record.

use super::{open_catalog, report_error};
use crate::core::bulk::{load_document, BulkCoordinator};
use clap::Args;
use std::path::PathBuf;

/// Failures listed individually before the rest are summarized
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Export document to import
    pub path: PathBuf,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(path = %self.path.display(), "Starting import command");

        let document = match load_document(&self.path).await {
            Ok(document) => document,
            Err(e) => return Ok(report_error("Failed to read import document", &e)),
        };

        let (_, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let coordinator = BulkCoordinator::new(store);
        let summary = match coordinator.import_document(&document).await {
            Ok(summary) => summary,
            Err(e) => return Ok(report_error("Import failed", &e)),
        };

        println!("📥 Import Summary:");
        println!("  Imported: {}", summary.success_count);
        println!("  Failed: {}", summary.error_count);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        if !summary.failures.is_empty() {
            println!();
            println!("⚠️  Failed entries:");
            for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
                println!("  - #{}: {}", failure.index, failure.message);
            }
            if summary.failures.len() > MAX_LISTED_FAILURES {
                println!(
                    "  ... and {} more failures",
                    summary.failures.len() - MAX_LISTED_FAILURES
                );
            }
            println!();
        }

        if summary.is_successful() {
            println!("✅ Import completed");
            Ok(0)
        } else {
            println!("⚠️  Import completed with failures");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Workspace;
    use serde_json::json;

    fn write_document(workspace: &Workspace, value: serde_json::Value) -> PathBuf {
        let path = workspace.dir.path().join("import.json");
        std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_import_partial_failure_exit_code() {
        let workspace = Workspace::new();
        let path = write_document(
            &workspace,
            json!({
                "version": "1.0",
                "records": [
                    {"name": "Negroni", "ingredients": "gin, campari, vermouth", "imageUrl": "https://example.com/n.jpg"},
                    {"ingredients": "no name", "imageUrl": "https://example.com/x.jpg"}
                ]
            }),
        );

        let code = ImportArgs { path }
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_import_malformed_document_exit_code() {
        let workspace = Workspace::new();
        let path = write_document(&workspace, json!({"version": "1.0"}));

        let code = ImportArgs { path }
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_fatal() {
        let workspace = Workspace::new();
        let code = ImportArgs {
            path: workspace.dir.path().join("absent.json"),
        }
        .execute(&workspace.config_path)
        .await
        .unwrap();
        assert_eq!(code, 5);
    }
}
