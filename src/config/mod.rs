//! Configuration management for Coupe.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Coupe uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `COUPE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use coupe::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("coupe.toml")?;
//!
//! println!("Storage: {} at {}", config.storage.backend, config.storage.path);
//! println!("Exports go to: {}", config.export.directory);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`StorageConfig`] - Catalog backend and database file
//! - [`ExportConfig`] - Export directory and formatting
//! - [`ImagesConfig`] - Image file size limit
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! backend = "redb"
//! path = "${HOME}/.local/share/coupe/catalog.redb"
//!
//! [export]
//! directory = "exports"
//! pretty = true
//!
//! [images]
//! max_file_bytes = 10485760
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CoupeConfig, ExportConfig, ImagesConfig, LoggingConfig, StorageBackendKind,
    StorageConfig,
};
