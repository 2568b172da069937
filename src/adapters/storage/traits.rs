//! Storage backend trait
//!
//! This module defines the trait that persistence backends must implement
//! to hold the catalog.

use crate::domain::{NewRecord, Record, RecordId, RecordPatch, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Schema version written to (and checked against) every persistent catalog
pub const SCHEMA_VERSION: u64 = 1;

/// Persistence backend for catalog records
///
/// Every method is one atomic unit of work against the persisted collection:
/// no caller may observe a half-applied effect of another call. Backends own
/// identity assignment, so two concurrent `insert` calls always receive
/// distinct ids.
///
/// Methods other than `init` fail with `StorageError::NotInitialized` until
/// `init` has succeeded.
#[async_trait]
pub trait CatalogBackend: Send + Sync + 'static {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Opens (creating if absent) the persistent collection
    ///
    /// Idempotent. Writes the schema version on first open and refuses a
    /// collection written by a newer schema.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the medium cannot be opened.
    async fn init(&self) -> Result<()>;

    /// Assigns the next id, stamps both timestamps with `now` and persists
    ///
    /// Ids come from a persisted counter and are never reused.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the record cannot be persisted.
    async fn insert(&self, record: NewRecord, now: DateTime<Utc>) -> Result<Record>;

    /// Retrieves a record by id
    ///
    /// Returns `Ok(None)` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored record is corrupt.
    async fn get(&self, id: RecordId) -> Result<Option<Record>>;

    /// Returns all records in ascending id order
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or a stored record is corrupt.
    async fn list(&self) -> Result<Vec<Record>>;

    /// Merges `patch` into an existing record inside one transaction
    ///
    /// Returns `Ok(None)` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the record cannot be persisted.
    async fn update(
        &self,
        id: RecordId,
        patch: RecordPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Record>>;

    /// Removes a record
    ///
    /// Returns `Ok(true)` if the record existed, `Ok(false)` otherwise.
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the removal cannot be persisted.
    async fn remove(&self, id: RecordId) -> Result<bool>;

    /// Removes every record, returning how many were removed
    ///
    /// The id counter is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::WriteFailed` if the removal cannot be persisted.
    async fn clear(&self) -> Result<usize>;

    /// Number of stored records
    ///
    /// Default implementation uses `list()`, but backends may override
    /// for efficiency.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}
