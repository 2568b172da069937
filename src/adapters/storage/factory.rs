//! Storage backend factory
//!
//! This module provides the factory function that builds a backend from configuration.

use crate::adapters::storage::memory::MemoryBackend;
use crate::adapters::storage::redb_backend::RedbBackend;
use crate::adapters::storage::traits::CatalogBackend;
use crate::config::schema::{StorageBackendKind, StorageConfig};
use std::sync::Arc;

/// Create a storage backend based on the configuration
///
/// The backend is only constructed here; the persistence medium is opened
/// when the catalog store calls `init`.
///
/// # Arguments
///
/// * `config` - The storage section of the Coupe configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements CatalogBackend
pub fn create_backend(config: &StorageConfig) -> Arc<dyn CatalogBackend> {
    match config.backend {
        StorageBackendKind::Redb => {
            tracing::info!(path = %config.path, "Creating redb catalog backend");
            Arc::new(RedbBackend::new(&config.path))
        }
        StorageBackendKind::Memory => {
            tracing::info!("Creating in-memory catalog backend");
            Arc::new(MemoryBackend::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_backend_by_kind() {
        let config = StorageConfig {
            backend: StorageBackendKind::Memory,
            path: String::new(),
        };
        assert_eq!(create_backend(&config).name(), "memory");

        let config = StorageConfig {
            backend: StorageBackendKind::Redb,
            path: "catalog.redb".to_string(),
        };
        assert_eq!(create_backend(&config).name(), "redb");
    }
}
