//! CLI command implementations
//!
//! Each command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Partial failure (some records failed) |
//! | 2 | Configuration, validation or selection error |
//! | 3 | Record not found |
//! | 4 | Storage unavailable |
//! | 5 | Fatal error |

pub mod add;
pub mod clear;
pub mod delete;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod search;
pub mod show;
pub mod update;
pub mod validate;

use crate::config::{load_config_or_default, CoupeConfig};
use crate::core::catalog::CatalogStore;
use crate::core::image::{is_embedded, ImageSource};
use crate::domain::{CoupeError, Record};
use std::io::{self, Write};
use std::path::PathBuf;

/// Exit code for a failed operation
pub fn exit_code_for(error: &CoupeError) -> i32 {
    match error {
        CoupeError::Configuration(_)
        | CoupeError::Validation(_)
        | CoupeError::EmptySelection
        | CoupeError::MalformedDocument(_)
        | CoupeError::Image(_) => 2,
        CoupeError::NotFound(_) => 3,
        e if e.is_storage_unavailable() => 4,
        _ => 5,
    }
}

/// Report `error` to the user and return its exit code
pub fn report_error(context: &str, error: &CoupeError) -> i32 {
    tracing::error!(error = %error, "{}", context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    exit_code_for(error)
}

/// Load configuration and open the catalog it points at
///
/// On failure the problem has already been reported and `Err` carries the
/// exit code.
pub async fn open_catalog(config_path: &str) -> Result<(CoupeConfig, CatalogStore), i32> {
    let config = load_config_or_default(config_path)
        .map_err(|e| report_error("Failed to load configuration", &e))?;

    let store = CatalogStore::from_config(&config.storage);
    store
        .init()
        .await
        .map_err(|e| report_error("Failed to open catalog", &e))?;

    Ok((config, store))
}

/// Image source chosen on the command line, if any
pub fn image_source(file: Option<&PathBuf>, url: Option<&String>) -> Option<ImageSource> {
    match (file, url) {
        (Some(path), _) => Some(ImageSource::File(path.clone())),
        (None, Some(url)) => Some(ImageSource::Url(url.clone())),
        (None, None) => None,
    }
}

/// Print records as a listing or as JSON
pub fn print_records(records: &[Record], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    for record in records {
        println!(
            "{:>5}  {}  ({})  [{}]",
            record.id,
            record.name,
            record.ingredients,
            image_label(record)
        );
    }
    println!();
    println!("{} record(s)", records.len());
    Ok(())
}

/// Print one record in full
pub fn print_record(record: &Record, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("Record {}", record.id);
    println!("  Name: {}", record.name);
    println!("  Ingredients: {}", record.ingredients);
    println!("  Image: {}", image_label(record));
    println!("  Created: {}", record.created_at.to_rfc3339());
    println!("  Updated: {}", record.updated_at.to_rfc3339());
    Ok(())
}

fn image_label(record: &Record) -> String {
    if is_embedded(&record.image_url) {
        format!("embedded {}", record.file_name)
    } else {
        record.image_url.clone()
    }
}

/// Ask the user to confirm a destructive action
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordId, StorageError};
    use test_case::test_case;

    #[test_case(CoupeError::Validation("x".into()), 2)]
    #[test_case(CoupeError::EmptySelection, 2)]
    #[test_case(CoupeError::MalformedDocument("x".into()), 2)]
    #[test_case(CoupeError::Configuration("x".into()), 2)]
    #[test_case(CoupeError::Image("x".into()), 2)]
    #[test_case(CoupeError::NotFound(RecordId::new(1)), 3)]
    #[test_case(CoupeError::Storage(StorageError::Unavailable("locked".into())), 4)]
    #[test_case(CoupeError::Storage(StorageError::NotInitialized), 4)]
    #[test_case(CoupeError::Storage(StorageError::WriteFailed("disk".into())), 5)]
    #[test_case(CoupeError::Io("x".into()), 5)]
    fn test_exit_code_for(error: CoupeError, expected: i32) {
        assert_eq!(exit_code_for(&error), expected);
    }

    #[test]
    fn test_image_source_prefers_file() {
        let file = PathBuf::from("a.png");
        let url = "https://example.com/a.png".to_string();

        assert_eq!(
            image_source(Some(&file), Some(&url)),
            Some(ImageSource::File(file.clone()))
        );
        assert_eq!(
            image_source(None, Some(&url)),
            Some(ImageSource::Url(url.clone()))
        );
        assert_eq!(image_source(None, None), None);
    }
}
