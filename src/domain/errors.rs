//! Domain error types
//!
//! This module defines the error hierarchy for Coupe.
//! All errors are domain-specific and don't expose third-party types.

use super::ids::RecordId;
use thiserror::Error;

/// Main Coupe error type
///
/// This is the primary error type used throughout the catalog. Store-level
/// failures are wrapped in [`StorageError`]; the remaining variants describe
/// caller mistakes (validation, selection, malformed documents) or lookups
/// that must succeed.
#[derive(Debug, Error)]
pub enum CoupeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persistence errors raised by a storage backend
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Update targeted a record that does not exist
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    /// Import document failed structural validation
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Bulk operation invoked without any selected ids
    #[error("No records selected")]
    EmptySelection,

    /// Record field validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Image file or URL could not be turned into an image reference
    #[error("Image error: {0}")]
    Image(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CoupeError {
    /// Returns true when the persistence medium itself cannot be used
    ///
    /// Covers both a medium that failed to open and a store that was never
    /// initialized.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            CoupeError::Storage(StorageError::Unavailable(_))
                | CoupeError::Storage(StorageError::NotInitialized)
        )
    }
}

/// Storage backend errors
///
/// Errors that occur when talking to the persistence medium.
/// These errors don't expose the embedded database's own error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The persistence medium could not be opened
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// An operation was issued before `init()`
    #[error("Catalog not initialized")]
    NotInitialized,

    /// A write transaction failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// A read transaction failed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// A stored record could not be decoded
    #[error("Corrupt record {id}: {message}")]
    Corrupt { id: u64, message: String },
}

/// Per-record failure detail collected by bulk operations
///
/// Provides the context needed to report which entry of a batch failed
/// without aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position of the entry in the input batch
    pub index: usize,

    /// Record id the entry targeted, when known
    pub record_id: Option<RecordId>,

    /// Error message
    pub message: String,
}

impl RecordFailure {
    /// Creates a new failure for the entry at `index`
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            record_id: None,
            message: message.into(),
        }
    }

    /// Sets the record id
    pub fn with_record_id(mut self, record_id: RecordId) -> Self {
        self.record_id = Some(record_id);
        self
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CoupeError {
    fn from(err: std::io::Error) -> Self {
        CoupeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CoupeError {
    fn from(err: serde_json::Error) -> Self {
        CoupeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CoupeError {
    fn from(err: toml::de::Error) -> Self {
        CoupeError::Configuration(format!("TOML parse error: {err}"))
    }
}
