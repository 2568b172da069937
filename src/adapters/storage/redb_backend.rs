//! Redb-backed catalog storage
//!
//! Records are stored as JSON blobs keyed by their integer id. A separate
//! metadata table holds the schema version and the next-id counter.

use super::traits::{CatalogBackend, SCHEMA_VERSION};
use crate::domain::{
    CoupeError, NewRecord, Record, RecordId, RecordPatch, Result, StorageError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Records keyed by id, values are JSON-encoded [`Record`]s
const RECORDS_TABLE: TableDefinition<'static, u64, &'static [u8]> =
    TableDefinition::new("records");

/// Catalog metadata (schema version, id counter)
const META_TABLE: TableDefinition<'static, &'static str, u64> = TableDefinition::new("meta");

const SCHEMA_VERSION_KEY: &str = "schema_version";
const NEXT_ID_KEY: &str = "next_id";
const FIRST_ID: u64 = 1;

/// Redb-backed catalog backend
///
/// Durable across process restarts. redb serializes write transactions, so
/// every mutating call (including id assignment) is atomic.
///
/// # Thread Safety
///
/// `RedbBackend` is `Clone` and can be shared across tasks. Blocking redb
/// calls run on tokio's blocking pool.
#[derive(Clone)]
pub struct RedbBackend {
    path: PathBuf,
    db: Arc<OnceCell<Database>>,
}

impl RedbBackend {
    /// Creates a backend for the database file at `path`
    ///
    /// Nothing is opened until [`CatalogBackend::init`] runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            db: Arc::new(OnceCell::new()),
        }
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn database(&self) -> Result<&Database> {
        self.db
            .get()
            .ok_or_else(|| StorageError::NotInitialized.into())
    }

    fn get_sync(&self, id: RecordId) -> Result<Option<Record>> {
        let read_txn = self
            .database()?
            .begin_read()
            .map_err(read_failed("Failed to begin read transaction"))?;
        let table = read_txn
            .open_table(RECORDS_TABLE)
            .map_err(read_failed("Failed to open records table"))?;

        let bytes = table
            .get(id.get())
            .map_err(read_failed("Failed to read record"))?
            .map(|guard| guard.value().to_vec());

        bytes.map(|bytes| decode(id.get(), &bytes)).transpose()
    }

    fn list_sync(&self) -> Result<Vec<Record>> {
        let read_txn = self
            .database()?
            .begin_read()
            .map_err(read_failed("Failed to begin read transaction"))?;
        let table = read_txn
            .open_table(RECORDS_TABLE)
            .map_err(read_failed("Failed to open records table"))?;

        let mut records = Vec::new();
        for item in table
            .iter()
            .map_err(read_failed("Failed to iterate records table"))?
        {
            let (key, value) = item.map_err(read_failed("Failed to read record entry"))?;
            records.push(decode(key.value(), value.value())?);
        }

        Ok(records)
    }

    fn insert_sync(&self, new: NewRecord, now: DateTime<Utc>) -> Result<Record> {
        let write_txn = self
            .database()?
            .begin_write()
            .map_err(write_failed("Failed to begin write transaction"))?;

        let record = {
            let mut meta = write_txn
                .open_table(META_TABLE)
                .map_err(write_failed("Failed to open metadata table"))?;
            let next = meta
                .get(NEXT_ID_KEY)
                .map_err(write_failed("Failed to read id counter"))?
                .map_or(FIRST_ID, |guard| guard.value());
            let following = next.checked_add(1).ok_or_else(|| {
                StorageError::WriteFailed("Record id space exhausted".to_string())
            })?;
            meta.insert(NEXT_ID_KEY, following)
                .map_err(write_failed("Failed to advance id counter"))?;

            let record = Record::from_new(RecordId::new(next), new, now);
            let bytes = encode(&record)?;

            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .map_err(write_failed("Failed to open records table"))?;
            table
                .insert(next, bytes.as_slice())
                .map_err(write_failed("Failed to insert record"))?;

            record
        };

        write_txn
            .commit()
            .map_err(write_failed("Failed to commit insert transaction"))?;

        Ok(record)
    }

    fn update_sync(
        &self,
        id: RecordId,
        patch: RecordPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Record>> {
        let write_txn = self
            .database()?
            .begin_write()
            .map_err(write_failed("Failed to begin write transaction"))?;

        let updated = {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .map_err(write_failed("Failed to open records table"))?;

            let existing = table
                .get(id.get())
                .map_err(write_failed("Failed to read record for update"))?
                .map(|guard| guard.value().to_vec());

            match existing {
                Some(bytes) => {
                    let mut record = decode(id.get(), &bytes)?;
                    record.apply(patch, now);
                    let bytes = encode(&record)?;
                    table
                        .insert(id.get(), bytes.as_slice())
                        .map_err(write_failed("Failed to write updated record"))?;
                    Some(record)
                }
                None => None,
            }
        };

        if updated.is_none() {
            write_txn
                .abort()
                .map_err(write_failed("Failed to abort update transaction"))?;
            return Ok(None);
        }

        write_txn
            .commit()
            .map_err(write_failed("Failed to commit update transaction"))?;

        Ok(updated)
    }

    fn remove_sync(&self, id: RecordId) -> Result<bool> {
        let write_txn = self
            .database()?
            .begin_write()
            .map_err(write_failed("Failed to begin write transaction"))?;

        let removed = {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .map_err(write_failed("Failed to open records table"))?;

            // Bound so the access guard drops before `table`
            let removed = table
                .remove(id.get())
                .map_err(write_failed("Failed to remove record"))?
                .is_some();
            removed
        };

        write_txn
            .commit()
            .map_err(write_failed("Failed to commit delete transaction"))?;

        Ok(removed)
    }

    fn clear_sync(&self) -> Result<usize> {
        let write_txn = self
            .database()?
            .begin_write()
            .map_err(write_failed("Failed to begin write transaction"))?;

        let removed = {
            let table = write_txn
                .open_table(RECORDS_TABLE)
                .map_err(write_failed("Failed to open records table"))?;
            table
                .len()
                .map_err(write_failed("Failed to count records"))?
        };

        write_txn
            .delete_table(RECORDS_TABLE)
            .map_err(write_failed("Failed to drop records table"))?;
        write_txn
            .open_table(RECORDS_TABLE)
            .map_err(write_failed("Failed to recreate records table"))?;

        write_txn
            .commit()
            .map_err(write_failed("Failed to commit clear transaction"))?;

        usize::try_from(removed)
            .map_err(|e| StorageError::WriteFailed(format!("Record count overflow: {e}")).into())
    }

    fn count_sync(&self) -> Result<usize> {
        let read_txn = self
            .database()?
            .begin_read()
            .map_err(read_failed("Failed to begin read transaction"))?;
        let table = read_txn
            .open_table(RECORDS_TABLE)
            .map_err(read_failed("Failed to open records table"))?;
        let count = table
            .len()
            .map_err(read_failed("Failed to count records"))?;

        usize::try_from(count)
            .map_err(|e| StorageError::ReadFailed(format!("Record count overflow: {e}")).into())
    }
}

/// Opens the database file and prepares both tables
fn open_database(path: &Path) -> Result<Database> {
    // Ensure parent directory exists before opening database
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Unavailable(format!(
                    "Failed to create catalog directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let db = Database::create(path).map_err(|e| {
        StorageError::Unavailable(format!(
            "Failed to open catalog database {}: {e}",
            path.display()
        ))
    })?;

    let write_txn = db
        .begin_write()
        .map_err(unavailable("Failed to begin initialization transaction"))?;
    {
        write_txn
            .open_table(RECORDS_TABLE)
            .map_err(unavailable("Failed to initialize records table"))?;

        let mut meta = write_txn
            .open_table(META_TABLE)
            .map_err(unavailable("Failed to initialize metadata table"))?;

        let stored_version = meta
            .get(SCHEMA_VERSION_KEY)
            .map_err(unavailable("Failed to read schema version"))?
            .map(|guard| guard.value());

        match stored_version {
            Some(version) if version > SCHEMA_VERSION => {
                return Err(StorageError::Unavailable(format!(
                    "Catalog schema version {version} is newer than supported version {SCHEMA_VERSION}"
                ))
                .into());
            }
            Some(_) => {}
            None => {
                meta.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION)
                    .map_err(unavailable("Failed to write schema version"))?;
            }
        }

        let has_counter = meta
            .get(NEXT_ID_KEY)
            .map_err(unavailable("Failed to read id counter"))?
            .is_some();
        if !has_counter {
            meta.insert(NEXT_ID_KEY, FIRST_ID)
                .map_err(unavailable("Failed to initialize id counter"))?;
        }
    }
    write_txn
        .commit()
        .map_err(unavailable("Failed to commit initialization transaction"))?;

    Ok(db)
}

fn encode(record: &Record) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| {
        StorageError::WriteFailed(format!("Failed to serialize record {}: {e}", record.id)).into()
    })
}

fn decode(id: u64, bytes: &[u8]) -> Result<Record> {
    serde_json::from_slice(bytes).map_err(|e| {
        StorageError::Corrupt {
            id,
            message: e.to_string(),
        }
        .into()
    })
}

fn unavailable<E: Display>(context: &'static str) -> impl FnOnce(E) -> StorageError {
    move |e| StorageError::Unavailable(format!("{context}: {e}"))
}

fn read_failed<E: Display>(context: &'static str) -> impl FnOnce(E) -> StorageError {
    move |e| StorageError::ReadFailed(format!("{context}: {e}"))
}

fn write_failed<E: Display>(context: &'static str) -> impl FnOnce(E) -> StorageError {
    move |e| StorageError::WriteFailed(format!("{context}: {e}"))
}

/// Runs a blocking redb call off the async executor
async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(CoupeError::Other(format!("Task join error: {e}"))),
    }
}

#[async_trait]
impl CatalogBackend for RedbBackend {
    fn name(&self) -> &'static str {
        "redb"
    }

    async fn init(&self) -> Result<()> {
        let path = self.path.clone();
        self.db
            .get_or_try_init(|| blocking(move || open_database(&path)))
            .await?;

        tracing::debug!(path = %self.path.display(), "Catalog database ready");
        Ok(())
    }

    async fn insert(&self, record: NewRecord, now: DateTime<Utc>) -> Result<Record> {
        let backend = self.clone();
        blocking(move || backend.insert_sync(record, now)).await
    }

    async fn get(&self, id: RecordId) -> Result<Option<Record>> {
        let backend = self.clone();
        blocking(move || backend.get_sync(id)).await
    }

    async fn list(&self) -> Result<Vec<Record>> {
        let backend = self.clone();
        blocking(move || backend.list_sync()).await
    }

    async fn update(
        &self,
        id: RecordId,
        patch: RecordPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Record>> {
        let backend = self.clone();
        blocking(move || backend.update_sync(id, patch, now)).await
    }

    async fn remove(&self, id: RecordId) -> Result<bool> {
        let backend = self.clone();
        blocking(move || backend.remove_sync(id)).await
    }

    async fn clear(&self) -> Result<usize> {
        let backend = self.clone();
        blocking(move || backend.clear_sync()).await
    }

    async fn count(&self) -> Result<usize> {
        let backend = self.clone();
        blocking(move || backend.count_sync()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample(name: &str) -> NewRecord {
        NewRecord::builder()
            .name(name)
            .ingredients("rum, lime")
            .image_url("https://example.com/x.png")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_operations_before_init_fail() {
        let tmp = TempDir::new().unwrap();
        let backend = RedbBackend::new(tmp.path().join("catalog.redb"));

        let err = backend.list().await.unwrap_err();
        assert!(err.is_storage_unavailable());
    }

    #[tokio::test]
    async fn test_init_is_idempotent_and_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("catalog.redb");
        let backend = RedbBackend::new(&path);

        backend.init().await.unwrap();
        backend.init().await.unwrap();

        assert!(path.exists());
        assert_eq!(backend.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let tmp = TempDir::new().unwrap();
        let backend = RedbBackend::new(tmp.path().join("catalog.redb"));
        backend.init().await.unwrap();

        let record = backend.insert(sample("Daiquiri"), Utc::now()).await.unwrap();
        assert_eq!(record.id, RecordId::new(1));

        let loaded = backend.get(record.id).await.unwrap().unwrap();
        assert_eq!(loaded, record);

        assert_eq!(backend.count().await.unwrap(), 1);
        assert!(backend.remove(record.id).await.unwrap());
        assert!(!backend.remove(record.id).await.unwrap());
        assert_eq!(backend.count().await.unwrap(), 0);
        assert!(backend.get(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counter_survives_reopen_and_clear() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.redb");

        {
            let backend = RedbBackend::new(&path);
            backend.init().await.unwrap();
            backend.insert(sample("A"), Utc::now()).await.unwrap();
            backend.insert(sample("B"), Utc::now()).await.unwrap();
            assert_eq!(backend.clear().await.unwrap(), 2);
        }

        let reopened = RedbBackend::new(&path);
        reopened.init().await.unwrap();
        assert!(reopened.list().await.unwrap().is_empty());

        let record = reopened.insert(sample("C"), Utc::now()).await.unwrap();
        assert_eq!(record.id, RecordId::new(3));
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let tmp = TempDir::new().unwrap();
        let backend = RedbBackend::new(tmp.path().join("catalog.redb"));
        backend.init().await.unwrap();

        let result = backend
            .update(RecordId::new(99), RecordPatch::new().with_name("X"), Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_newer_schema_is_refused() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.redb");

        {
            let db = Database::create(&path).unwrap();
            let txn = db.begin_write().unwrap();
            {
                let mut meta = txn.open_table(META_TABLE).unwrap();
                meta.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION + 1).unwrap();
            }
            txn.commit().unwrap();
        }

        let backend = RedbBackend::new(&path);
        let err = backend.init().await.unwrap_err();
        assert!(err.is_storage_unavailable());
        assert!(err.to_string().contains("newer than supported"));
    }
}
