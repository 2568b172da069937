//! Catalog store
//!
//! The store is the single persistence boundary for records. It owns identity
//! assignment and timestamp bookkeeping and delegates durability to a
//! [`CatalogBackend`].

use crate::adapters::storage::{create_backend, CatalogBackend, MemoryBackend, RedbBackend};
use crate::config::schema::StorageConfig;
use crate::domain::{CoupeError, NewRecord, Record, RecordId, RecordPatch, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

/// Durable CRUD and search over catalog records
///
/// `CatalogStore` is cheap to clone; clones share the same backend, so it
/// can be handed to the bulk coordinator and to concurrent tasks.
///
/// # Example
///
/// ```rust,no_run
/// use coupe::core::catalog::CatalogStore;
/// use coupe::domain::NewRecord;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = CatalogStore::open_file("data/catalog.redb");
/// store.init().await?;
///
/// let id = store
///     .add(NewRecord::builder()
///         .name("Mojito")
///         .ingredients("light rum, lime, mint")
///         .image_url("https://example.com/mojito.jpg")
///         .build()?)
///     .await?;
///
/// let hits = store.search("RUM").await?;
/// assert!(hits.iter().any(|r| r.id == id));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CatalogStore {
    backend: Arc<dyn CatalogBackend>,
}

impl CatalogStore {
    /// Create a store over an existing backend
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self { backend }
    }

    /// Create a store backed by a redb file at `path`
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(RedbBackend::new(path)))
    }

    /// Create a non-persistent store
    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Create a store from the storage section of the configuration
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(create_backend(config))
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Open (creating if absent) the persistent collection
    ///
    /// Idempotent; must run once before any other operation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the medium cannot be opened.
    pub async fn init(&self) -> Result<()> {
        self.backend.init().await.map_err(|e| {
            tracing::error!(backend = self.backend.name(), error = %e, "Failed to open catalog");
            e
        })?;

        tracing::info!(backend = self.backend.name(), "Catalog initialized");
        Ok(())
    }

    /// Add a record, returning its newly assigned id
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::Validation` if a required field is blank and
    /// `StorageError::WriteFailed` if the record cannot be persisted.
    pub async fn add(&self, record: NewRecord) -> Result<RecordId> {
        record.validate().map_err(CoupeError::Validation)?;

        let stored = self.backend.insert(record, Utc::now()).await?;

        tracing::debug!(record_id = %stored.id, name = %stored.name, "Record added");
        Ok(stored.id)
    }

    /// All records in storage order
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn get_all(&self) -> Result<Vec<Record>> {
        self.backend.list().await
    }

    /// Look up a single record; `Ok(None)` when the id is unknown
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn get(&self, id: RecordId) -> Result<Option<Record>> {
        self.backend.get(id).await
    }

    /// Merge `patch` into an existing record and refresh `updated_at`
    ///
    /// # Errors
    ///
    /// Returns `CoupeError::NotFound` if the id is unknown and
    /// `CoupeError::Validation` if the patch blanks a required field.
    pub async fn update(&self, id: RecordId, patch: RecordPatch) -> Result<RecordId> {
        patch.validate().map_err(CoupeError::Validation)?;

        match self.backend.update(id, patch, Utc::now()).await? {
            Some(record) => {
                tracing::debug!(record_id = %record.id, "Record updated");
                Ok(record.id)
            }
            None => Err(CoupeError::NotFound(id)),
        }
    }

    /// Remove a record; removing an unknown id succeeds
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the removal cannot be persisted.
    pub async fn delete(&self, id: RecordId) -> Result<()> {
        let existed = self.backend.remove(id).await?;
        tracing::debug!(record_id = %id, existed, "Record deleted");
        Ok(())
    }

    /// Case-insensitive substring search over name and ingredients
    ///
    /// Results keep [`get_all`](Self::get_all) order. An empty query matches
    /// every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Record>> {
        let needle = query.to_lowercase();
        let records = self.backend.list().await?;

        let matches: Vec<Record> = records
            .into_iter()
            .filter(|record| record.matches_lowercase(&needle))
            .collect();

        tracing::debug!(query = %query, matches = matches.len(), "Search completed");
        Ok(matches)
    }

    /// Remove every record
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the removal cannot be persisted.
    pub async fn clear(&self) -> Result<()> {
        let removed = self.backend.clear().await?;
        tracing::info!(removed, "Catalog cleared");
        Ok(())
    }

    /// Number of stored records
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn count(&self) -> Result<usize> {
        self.backend.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn new_record(name: &str, ingredients: &str) -> NewRecord {
        NewRecord::builder()
            .name(name)
            .ingredients(ingredients)
            .image_url("data:image/png;base64,iVBORw0KGgo=")
            .file_name("photo.png")
            .build()
            .unwrap()
    }

    async fn store() -> CatalogStore {
        let store = CatalogStore::memory();
        store.init().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = store().await;
        let mut ids = HashSet::new();

        for i in 0..20 {
            let id = store
                .add(new_record(&format!("Drink {i}"), "rum"))
                .await
                .unwrap();
            assert!(ids.insert(id), "duplicate id {id}");
        }
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let store = store().await;
        let input = new_record("Mojito", "light rum, lime, mint");

        let id = store.add(input.clone()).await.unwrap();
        let record = store.get(id).await.unwrap().unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.into_new(), input);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let store = store().await;
        let mut input = new_record("Mojito", "rum");
        input.name = "  ".to_string();

        let err = store.add(input).await.unwrap_err();
        assert!(matches!(err, CoupeError::Validation(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let store = store().await;
        assert!(store.get(RecordId::new(404)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = store().await;
        let id = store.add(new_record("Mojito", "rum, mint")).await.unwrap();
        let before = store.get(id).await.unwrap().unwrap();

        let returned = store
            .update(id, RecordPatch::new().with_ingredients("X"))
            .await
            .unwrap();
        let after = store.get(id).await.unwrap().unwrap();

        assert_eq!(returned, id);
        assert_eq!(after.ingredients, "X");
        assert_eq!(after.name, before.name);
        assert_eq!(after.image_url, before.image_url);
        assert_eq!(after.file_name, before.file_name);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let store = store().await;
        let err = store
            .update(RecordId::new(7), RecordPatch::new().with_name("Gimlet"))
            .await
            .unwrap_err();

        assert!(matches!(err, CoupeError::NotFound(id) if id == RecordId::new(7)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = store().await;
        let id = store.add(new_record("Mojito", "rum")).await.unwrap();

        store.delete(id).await.unwrap();
        store.delete(id).await.unwrap();

        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_empty_query_matches_get_all() {
        let store = store().await;
        store.add(new_record("Mojito", "rum, mint")).await.unwrap();
        store.add(new_record("Negroni", "gin, campari")).await.unwrap();

        let all = store.get_all().await.unwrap();
        let hits = store.search("").await.unwrap();

        assert_eq!(hits, all);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_both_fields() {
        let store = store().await;
        let daiquiri = store
            .add(new_record("Daiquiri", "light rum, lime"))
            .await
            .unwrap();
        let negroni = store
            .add(new_record("Negroni", "gin, campari"))
            .await
            .unwrap();

        let rum: Vec<RecordId> = store
            .search("RUM")
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(rum, vec![daiquiri]);

        let by_name: Vec<RecordId> = store
            .search("negr")
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(by_name, vec![negroni]);

        assert!(store.search("tequila").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = store().await;
        store.add(new_record("Mojito", "rum")).await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uninitialized_store_fails() {
        let store = CatalogStore::memory();
        let err = store.get_all().await.unwrap_err();
        assert!(err.is_storage_unavailable());
    }
}
