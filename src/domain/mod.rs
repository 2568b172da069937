//! Domain models and types for Coupe.
//!
//! This module contains the catalog's data model and error types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identity** ([`RecordId`]), assigned only by the store
//! - **Records** ([`Record`], [`NewRecord`], [`RecordPatch`])
//! - **Transport** ([`ExportDocument`])
//! - **Error types** ([`CoupeError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Creating and patching records
//!
//! ```rust
//! use coupe::domain::{NewRecord, RecordPatch};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let new = NewRecord::builder()
//!     .name("Margarita")
//!     .ingredients("tequila, lime, triple sec")
//!     .image_url("https://example.com/margarita.jpg")
//!     .build()?;
//!
//! let patch = RecordPatch::new().with_ingredients("tequila, lime, agave");
//! assert!(patch.validate().is_ok());
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{ExportDocument, EXPORT_FORMAT_VERSION};
pub use errors::{CoupeError, RecordFailure, StorageError};
pub use ids::RecordId;
pub use record::{NewRecord, NewRecordBuilder, Record, RecordPatch};
pub use result::Result;
