//! Show command implementation

use super::{open_catalog, print_record, report_error};
use crate::domain::RecordId;
use clap::Args;

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record id
    pub id: RecordId,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match store.get(self.id).await {
            Ok(Some(record)) => {
                print_record(&record, self.json)?;
                Ok(0)
            }
            Ok(None) => {
                eprintln!("❌ Record {} not found", self.id);
                Ok(3)
            }
            Err(e) => Ok(report_error("Failed to read record", &e)),
        }
    }
}
