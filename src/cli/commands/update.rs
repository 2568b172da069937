//! Update command implementation
//!
//! Changes only the fields given on the command line.

use super::{image_source, open_catalog, report_error};
use crate::domain::{CoupeError, RecordId, RecordPatch};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record id
    pub id: RecordId,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New ingredient list
    #[arg(long)]
    pub ingredients: Option<String>,

    /// Replace the image with a local file
    #[arg(long, conflicts_with = "image_url")]
    pub image_file: Option<PathBuf>,

    /// Replace the image with a URL
    #[arg(long)]
    pub image_url: Option<String>,
}

impl UpdateArgs {
    /// Execute the update command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(record_id = %self.id, "Updating record");

        let (config, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let mut patch = RecordPatch::new();
        if let Some(name) = &self.name {
            patch = patch.with_name(name.trim());
        }
        if let Some(ingredients) = &self.ingredients {
            patch = patch.with_ingredients(ingredients.trim());
        }
        if let Some(source) = image_source(self.image_file.as_ref(), self.image_url.as_ref()) {
            match source.resolve(config.images.max_file_bytes).await {
                Ok(image) => {
                    patch = patch
                        .with_image_url(image.image_url)
                        .with_file_name(image.file_name);
                }
                Err(e) => return Ok(report_error("Failed to read image", &e)),
            }
        }

        if patch.is_empty() {
            let error = CoupeError::Validation("nothing to update".to_string());
            return Ok(report_error("No fields given", &error));
        }

        match store.update(self.id, patch).await {
            Ok(id) => {
                println!("✅ Updated record {id}");
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to update record", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::add::AddArgs;
    use crate::cli::commands::test_support::Workspace;

    fn update(id: u64, name: Option<&str>) -> UpdateArgs {
        UpdateArgs {
            id: RecordId::new(id),
            name: name.map(str::to_string),
            ingredients: None,
            image_file: None,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_update_exit_codes() {
        let workspace = Workspace::new();
        AddArgs {
            name: "Gimlet".to_string(),
            ingredients: "gin, lime".to_string(),
            image_file: None,
            image_url: Some("https://example.com/gimlet.jpg".to_string()),
        }
        .execute(&workspace.config_path)
        .await
        .unwrap();

        let code = update(1, Some("Gin Gimlet"))
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 0);

        let code = update(99, Some("Gin Gimlet"))
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 3);

        let code = update(1, None)
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
