//! Clear command implementation

use super::{confirm, open_catalog, report_error};
use clap::Args;

/// Arguments for the clear command
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl ClearArgs {
    /// Execute the clear command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let count = match store.count().await {
            Ok(count) => count,
            Err(e) => return Ok(report_error("Failed to read catalog", &e)),
        };

        if count == 0 {
            println!("Catalog is already empty.");
            return Ok(0);
        }

        if !self.yes && !confirm(&format!("Remove all {count} record(s)?"))? {
            println!("Clear cancelled.");
            return Ok(0);
        }

        match store.clear().await {
            Ok(()) => {
                println!("✅ Removed {count} record(s)");
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to clear catalog", &e)),
        }
    }
}
