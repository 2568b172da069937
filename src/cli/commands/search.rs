//! Search command implementation

use super::{open_catalog, print_records, report_error};
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in names and ingredients (case-insensitive)
    pub query: String,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    /// Execute the search command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::debug!(query = %self.query, "Searching catalog");

        let (_, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match store.search(&self.query).await {
            Ok(records) => {
                print_records(&records, self.json)?;
                Ok(0)
            }
            Err(e) => Ok(report_error("Search failed", &e)),
        }
    }
}
