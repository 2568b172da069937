//! List command implementation

use super::{open_catalog, print_records, report_error};
use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print records as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match store.get_all().await {
            Ok(records) => {
                print_records(&records, self.json)?;
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to list records", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Workspace;

    #[tokio::test]
    async fn test_list_empty_catalog() {
        let workspace = Workspace::new();
        let code = ListArgs { json: true }
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
