//! Configuration schema types
//!
//! This module defines the configuration structure for Coupe. Every section
//! has defaults, so an empty file (or no file at all) yields a usable
//! configuration.

use serde::{Deserialize, Serialize};

/// Catalog storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Embedded redb database file
    #[default]
    Redb,
    /// Non-persistent in-memory catalog
    Memory,
}

impl std::fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendKind::Redb => write!(f, "redb"),
            StorageBackendKind::Memory => write!(f, "memory"),
        }
    }
}

/// Main Coupe configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoupeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Catalog storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Export document settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Image ingestion settings
    #[serde(default)]
    pub images: ImagesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CoupeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.storage.validate()?;
        self.export.validate()?;
        self.images.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Catalog storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind (redb or memory)
    #[serde(default)]
    pub backend: StorageBackendKind,

    /// Database file path (redb backend only)
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == StorageBackendKind::Redb && self.path.trim().is_empty() {
            return Err("storage.path cannot be empty when storage.backend = 'redb'".to_string());
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            path: default_storage_path(),
        }
    }
}

/// Export document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory where export documents are written when no output path is given
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Pretty-print exported JSON
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("export.directory cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            pretty: true,
        }
    }
}

/// Image ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Largest image file accepted for embedding, in bytes
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl ImagesConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_file_bytes == 0 {
            return Err("images.max_file_bytes must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_storage_path() -> String {
    "data/catalog.redb".to_string()
}

fn default_export_directory() -> String {
    ".".to_string()
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
