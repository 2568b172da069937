//! Persistence integrations for Coupe.
//!
//! - [`storage`] - Catalog storage backends (redb file, in-memory)
//!
//! # Design Pattern
//!
//! Backends follow the **Adapter Pattern** to isolate the embedded database
//! from the catalog logic and to let tests run against an in-memory
//! implementation.
//!
//! ```rust,no_run
//! use coupe::adapters::storage::{CatalogBackend, RedbBackend};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = RedbBackend::new("data/catalog.redb");
//! backend.init().await?;
//! println!("{} records", backend.count().await?);
//! # Ok(())
//! # }
//! ```

pub mod storage;
