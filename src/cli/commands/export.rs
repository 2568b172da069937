//! Export command implementation
//!
//! Writes the whole catalog, or a selection of it, to an export document.

use super::{open_catalog, report_error};
use crate::core::bulk::{default_export_file_name, save_document, BulkCoordinator};
use crate::domain::ids::parse_id_list;
use crate::domain::CoupeError;
use chrono::Utc;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export only these ids (comma-separated)
    #[arg(long)]
    pub ids: Option<String>,

    /// Output file (defaults to a dated file in export.directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let selection = match self.ids.as_deref().map(parse_id_list).transpose() {
            Ok(selection) => selection,
            Err(e) => return Ok(report_error("Invalid --ids", &CoupeError::Validation(e))),
        };

        let (config, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let coordinator = BulkCoordinator::new(store);
        let outcome = match &selection {
            Some(ids) => coordinator.export_subset(ids).await,
            None => coordinator.export_all().await,
        };
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(e) => return Ok(report_error("Export failed", &e)),
        };

        let path = self.output.clone().unwrap_or_else(|| {
            Path::new(&config.export.directory).join(default_export_file_name(Utc::now()))
        });

        if let Err(e) = save_document(&outcome.document, &path, config.export.pretty).await {
            return Ok(report_error("Failed to write export document", &e));
        }

        println!("📦 Export Summary:");
        println!("  Requested: {}", outcome.requested);
        println!("  Exported: {}", outcome.located);
        if outcome.skipped() > 0 {
            println!("  Not found: {}", outcome.skipped());
        }
        println!("  File: {}", path.display());
        println!("✅ Export completed");

        Ok(0)
    }
}
