//! Catalog storage backends
//!
//! This module provides a trait-based abstraction for the persistence medium,
//! allowing the catalog to run on an embedded redb file or purely in memory.

pub mod factory;
pub mod memory;
pub mod redb_backend;
pub mod traits;

pub use factory::create_backend;
pub use memory::MemoryBackend;
pub use redb_backend::RedbBackend;
pub use traits::{CatalogBackend, SCHEMA_VERSION};
