//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CoupeConfig, StorageBackendKind};
use crate::domain::errors::CoupeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CoupeConfig
/// 4. Applies environment variable overrides (COUPE_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use coupe::config::loader::load_config;
///
/// let config = load_config("coupe.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CoupeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CoupeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CoupeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;
    finish(config)
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist
///
/// Environment overrides and validation apply in both cases, so a bare
/// `coupe` invocation can still be steered with `COUPE_*` variables.
///
/// # Errors
///
/// Returns an error if an existing file is invalid or if the resulting
/// configuration fails validation.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<CoupeConfig> {
    let path = path.as_ref();

    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    finish(CoupeConfig::default())
}

/// Parses TOML text (after `${VAR}` substitution) into a configuration
///
/// Overrides and validation are not applied.
///
/// # Errors
///
/// Returns an error if substitution or TOML parsing fails.
pub fn parse_config(contents: &str) -> Result<CoupeConfig> {
    let contents = substitute_env_vars(contents)?;

    toml::from_str(&contents)
        .map_err(|e| CoupeError::Configuration(format!("Failed to parse TOML: {}", e)))
}

fn finish(mut config: CoupeConfig) -> Result<CoupeConfig> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    config.validate().map_err(|e| {
        CoupeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CoupeError::Configuration(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Comments are copied verbatim
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CoupeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using COUPE_* prefix
///
/// Variables follow the pattern COUPE_<SECTION>_<KEY>, for example
/// COUPE_STORAGE_PATH or COUPE_EXPORT_DIRECTORY.
///
/// # Arguments
///
/// * `config` - Mutable reference to the configuration to update
/// * `lookup` - Resolves a variable name to its value
fn apply_env_overrides<F>(config: &mut CoupeConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    // Application overrides
    if let Some(val) = lookup("COUPE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Storage overrides
    if let Some(val) = lookup("COUPE_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "redb" => StorageBackendKind::Redb,
            "memory" => StorageBackendKind::Memory,
            other => {
                return Err(CoupeError::Configuration(format!(
                    "Invalid COUPE_STORAGE_BACKEND '{}'. Must be one of: redb, memory",
                    other
                )))
            }
        };
    }
    if let Some(val) = lookup("COUPE_STORAGE_PATH") {
        config.storage.path = val;
    }

    // Export overrides
    if let Some(val) = lookup("COUPE_EXPORT_DIRECTORY") {
        config.export.directory = val;
    }
    if let Some(val) = lookup("COUPE_EXPORT_PRETTY") {
        config.export.pretty = val.parse().unwrap_or(true);
    }

    // Image overrides
    if let Some(val) = lookup("COUPE_IMAGES_MAX_FILE_BYTES") {
        if let Ok(bytes) = val.parse() {
            config.images.max_file_bytes = bytes;
        }
    }

    // Logging overrides
    if let Some(val) = lookup("COUPE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = lookup("COUPE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = lookup("COUPE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
