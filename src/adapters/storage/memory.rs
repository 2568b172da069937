//! In-memory catalog storage backend.
//!
//! Provides a fast, non-persistent catalog. Ideal for tests and for
//! throwaway sessions where nothing should touch the disk.

use super::traits::CatalogBackend;
use crate::domain::{NewRecord, Record, RecordId, RecordPatch, Result, StorageError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct MemoryState {
    initialized: bool,
    next_id: u64,
    records: BTreeMap<u64, Record>,
}

impl MemoryState {
    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(StorageError::NotInitialized.into())
        }
    }
}

/// In-memory catalog backend
///
/// All data is lost when the last clone is dropped. A single mutex guards
/// the map and the id counter, which makes every call atomic.
///
/// # Example
///
/// ```ignore
/// use coupe::adapters::storage::{CatalogBackend, MemoryBackend};
///
/// let backend = MemoryBackend::new();
/// backend.init().await?;
/// ```
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn init(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.initialized {
            state.initialized = true;
            state.next_id = 1;
        }
        Ok(())
    }

    async fn insert(&self, record: NewRecord, now: DateTime<Utc>) -> Result<Record> {
        let mut state = self.state.lock().await;
        state.ensure_initialized()?;

        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| StorageError::WriteFailed("Record id space exhausted".to_string()))?;

        let record = Record::from_new(RecordId::new(id), record, now);
        state.records.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: RecordId) -> Result<Option<Record>> {
        let state = self.state.lock().await;
        state.ensure_initialized()?;
        Ok(state.records.get(&id.get()).cloned())
    }

    async fn list(&self) -> Result<Vec<Record>> {
        let state = self.state.lock().await;
        state.ensure_initialized()?;
        Ok(state.records.values().cloned().collect())
    }

    async fn update(
        &self,
        id: RecordId,
        patch: RecordPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Record>> {
        let mut state = self.state.lock().await;
        state.ensure_initialized()?;

        Ok(state.records.get_mut(&id.get()).map(|record| {
            record.apply(patch, now);
            record.clone()
        }))
    }

    async fn remove(&self, id: RecordId) -> Result<bool> {
        let mut state = self.state.lock().await;
        state.ensure_initialized()?;
        Ok(state.records.remove(&id.get()).is_some())
    }

    async fn clear(&self) -> Result<usize> {
        let mut state = self.state.lock().await;
        state.ensure_initialized()?;
        let removed = state.records.len();
        state.records.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<usize> {
        let state = self.state.lock().await;
        state.ensure_initialized()?;
        Ok(state.records.len())
    }
}
