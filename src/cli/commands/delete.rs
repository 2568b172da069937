//! Delete command implementation
//!
//! Deletes a selection of records in one batch.

use super::{confirm, open_catalog, report_error};
use crate::core::bulk::BulkCoordinator;
use crate::domain::RecordId;
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Ids of the records to delete
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<RecordId>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(count = self.ids.len(), "Starting delete command");

        let (_, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        if !self.yes && !confirm(&format!("Delete {} record(s)?", self.ids.len()))? {
            println!("Delete cancelled.");
            return Ok(0);
        }

        let coordinator = BulkCoordinator::new(store);
        let summary = match coordinator.delete_subset(&self.ids).await {
            Ok(summary) => summary,
            Err(e) => return Ok(report_error("Delete failed", &e)),
        };

        println!("🗑️  Delete Summary:");
        println!("  Issued: {}", summary.issued);
        println!("  Failed: {}", summary.failures.len());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());

        for failure in &summary.failures {
            match failure.record_id {
                Some(id) => println!("  - {}: {}", id, failure.message),
                None => println!("  - #{}: {}", failure.index, failure.message),
            }
        }

        if summary.is_successful() {
            println!("✅ Delete completed");
            Ok(0)
        } else {
            println!("⚠️  Delete completed with failures");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Workspace;

    #[tokio::test]
    async fn test_delete_unknown_ids_succeeds() {
        let workspace = Workspace::new();
        let code = DeleteArgs {
            ids: vec![RecordId::new(4), RecordId::new(4), RecordId::new(5)],
            yes: true,
        }
        .execute(&workspace.config_path)
        .await
        .unwrap();
        assert_eq!(code, 0);
    }
}
