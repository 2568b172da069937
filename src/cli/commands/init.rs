//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `coupe init`
pub const SAMPLE_CONFIG: &str = r#"# Coupe Configuration File
# Local cocktail image catalog

[application]
log_level = "info"  # trace | debug | info | warn | error

[storage]
backend = "redb"  # redb | memory
path = "data/catalog.redb"

[export]
# Where `coupe export` writes when --output is not given
directory = "exports"
pretty = true

[images]
# Largest image file accepted by --image-file (10 MiB)
max_file_bytes = 10485760

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"  # daily | hourly | never
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "coupe.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: coupe validate-config");
                println!("  3. Add a record: coupe add --name ... --ingredients ... --image-file ...");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }
}
