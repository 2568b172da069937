//! Core business logic for Coupe.
//!
//! # Modules
//!
//! - [`catalog`] - The catalog store: CRUD and search over records
//! - [`bulk`] - Export, import and delete across many records
//! - [`image`] - Turning image files and URLs into record fields
//!
//! # Bulk Workflow
//!
//! 1. **Select**: Collect the ids to act on, or take the whole catalog
//! 2. **Run**: Each record is handled independently; failures are recorded
//! 3. **Report**: A summary carries counts and per-record failures
//!
//! # Example
//!
//! ```rust,no_run
//! use coupe::core::bulk::{load_document, BulkCoordinator};
//! use coupe::core::catalog::CatalogStore;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CatalogStore::open_file("data/catalog.redb");
//! store.init().await?;
//!
//! let coordinator = BulkCoordinator::new(store);
//! let document = load_document(Path::new("coupe-export-2026-10-19.json")).await?;
//! let summary = coordinator.import_document(&document).await?;
//!
//! println!("Imported: {}", summary.success_count);
//! println!("Failed: {}", summary.error_count);
//! # Ok(())
//! # }
//! ```

pub mod bulk;
pub mod catalog;
pub mod image;
