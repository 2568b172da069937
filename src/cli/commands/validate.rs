//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Coupe configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike other commands, a missing file is an error here.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Storage Backend: {}", config.storage.backend);
        println!("  Storage Path: {}", config.storage.path);
        println!("  Export Directory: {}", config.export.directory);
        println!("  Pretty Exports: {}", config.export.pretty);
        println!("  Max Image Size: {} bytes", config.images.max_file_bytes);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::Workspace;

    #[tokio::test]
    async fn test_validate_existing_config() {
        let workspace = Workspace::new();
        let code = ValidateArgs {}
            .execute(&workspace.config_path)
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_missing_config() {
        let code = ValidateArgs {}
            .execute("does-not-exist/coupe.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
