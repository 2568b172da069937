// Coupe - Local cocktail image catalog
// Copyright (c) 2025 Coupe Contributors
// Licensed under the MIT License

//! # Coupe - Local Cocktail Image Catalog
//!
//! Coupe keeps a persistent catalog of image records (a name, an ingredient
//! list and an embedded or linked image) in a local embedded database, and
//! moves them in bulk through a versioned JSON export document.
//!
//! ## Overview
//!
//! This library provides:
//! - **Storing** records with store-assigned ids and timestamps
//! - **Searching** names and ingredients case-insensitively
//! - **Exporting** the whole catalog or a selection to a JSON document
//! - **Importing** documents as new records, continuing past bad entries
//! - **Deleting** selections of records in one batch
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Catalog store, bulk coordinator and image sources
//! - [`adapters`] - Storage backends (redb file, in-memory)
//! - [`domain`] - Records, ids, export documents and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coupe::core::bulk::BulkCoordinator;
//! use coupe::core::catalog::CatalogStore;
//! use coupe::domain::NewRecord;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CatalogStore::open_file("data/catalog.redb");
//!     store.init().await?;
//!
//!     store
//!         .add(NewRecord::builder()
//!             .name("Negroni")
//!             .ingredients("gin, campari, sweet vermouth")
//!             .image_url("https://example.com/negroni.jpg")
//!             .build()?)
//!         .await?;
//!
//!     let coordinator = BulkCoordinator::new(store);
//!     let outcome = coordinator.export_all().await?;
//!     println!("Exported {} records", outcome.located);
//!     Ok(())
//! }
//! ```
//!
//! ## Partial Success
//!
//! Bulk imports and deletes never stop at the first bad record. Each
//! failure is recorded in the returned summary with its position in the
//! batch:
//!
//! ```rust,no_run
//! use coupe::core::bulk::BulkCoordinator;
//! use coupe::core::catalog::CatalogStore;
//!
//! # async fn example(document: serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
//! let store = CatalogStore::memory();
//! store.init().await?;
//!
//! let summary = BulkCoordinator::new(store).import_document(&document).await?;
//! for failure in &summary.failures {
//!     eprintln!("entry {} failed: {}", failure.index, failure.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All library operations return [`domain::Result`], whose error type is
//! [`domain::CoupeError`]. The CLI maps errors to process exit codes.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
