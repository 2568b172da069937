//! Add command implementation
//!
//! Adds a single record with an embedded image file or an image URL.

use super::{image_source, open_catalog, report_error};
use crate::domain::{CoupeError, NewRecord};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Record name
    #[arg(long)]
    pub name: String,

    /// Ingredient list
    #[arg(long)]
    pub ingredients: String,

    /// Local image file to embed
    #[arg(long, conflicts_with = "image_url", required_unless_present = "image_url")]
    pub image_file: Option<PathBuf>,

    /// Image URL (http, https or data:image/...)
    #[arg(long)]
    pub image_url: Option<String>,
}

impl AddArgs {
    /// Execute the add command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let name = self.name.trim();
        tracing::info!(name = %name, "Adding record");

        let (config, store) = match open_catalog(config_path).await {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let Some(source) = image_source(self.image_file.as_ref(), self.image_url.as_ref()) else {
            let error = CoupeError::Validation("an image file or URL is required".to_string());
            return Ok(report_error("No image given", &error));
        };

        let image = match source.resolve(config.images.max_file_bytes).await {
            Ok(image) => image,
            Err(e) => return Ok(report_error("Failed to read image", &e)),
        };

        let record = NewRecord::builder()
            .name(name)
            .ingredients(self.ingredients.trim())
            .image_url(image.image_url)
            .file_name(image.file_name)
            .build()
            .map_err(CoupeError::Validation);

        let record = match record {
            Ok(record) => record,
            Err(e) => return Ok(report_error("Invalid record", &e)),
        };

        match store.add(record).await {
            Ok(id) => {
                println!("✅ Added record {id}: {name}");
                Ok(0)
            }
            Err(e) => Ok(report_error("Failed to add record", &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Workspace;
    use crate::config::load_config;
    use crate::core::catalog::CatalogStore;

    fn args(name: &str, image_url: Option<&str>, image_file: Option<PathBuf>) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            ingredients: "gin, lime".to_string(),
            image_file,
            image_url: image_url.map(str::to_string),
        }
    }

    async fn stored_names(workspace: &Workspace) -> Vec<String> {
        let config = load_config(&workspace.config_path).unwrap();
        let store = CatalogStore::from_config(&config.storage);
        store.init().await.unwrap();
        store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect()
    }

    #[tokio::test]
    async fn test_add_with_url() {
        let workspace = Workspace::new();

        let code = args("Gimlet", Some("https://example.com/gimlet.jpg"), None)
            .execute(&workspace.config_path)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(stored_names(&workspace).await, vec!["Gimlet".to_string()]);
    }

    #[tokio::test]
    async fn test_add_with_file() {
        let workspace = Workspace::new();
        let image = workspace.dir.path().join("gimlet.png");
        std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

        let code = args("Gimlet", None, Some(image))
            .execute(&workspace.config_path)
            .await
            .unwrap();

        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_add_trims_name_and_ingredients() {
        let workspace = Workspace::new();
        let mut padded = args("  Mojito ", Some("https://example.com/mojito.jpg"), None);
        padded.ingredients = " rum, mint\n".to_string();

        let code = padded.execute(&workspace.config_path).await.unwrap();
        assert_eq!(code, 0);

        let config = load_config(&workspace.config_path).unwrap();
        let store = CatalogStore::from_config(&config.storage);
        store.init().await.unwrap();
        let records = store.get_all().await.unwrap();
        assert_eq!(records[0].name, "Mojito");
        assert_eq!(records[0].ingredients, "rum, mint");
    }

    #[tokio::test]
    async fn test_add_blank_name_is_validation_error() {
        let workspace = Workspace::new();

        let code = args(" ", Some("https://example.com/gimlet.jpg"), None)
            .execute(&workspace.config_path)
            .await
            .unwrap();

        assert_eq!(code, 2);
        assert!(stored_names(&workspace).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_bad_url_is_validation_error() {
        let workspace = Workspace::new();

        let code = args("Gimlet", Some("not a url"), None)
            .execute(&workspace.config_path)
            .await
            .unwrap();

        assert_eq!(code, 2);
    }
}
