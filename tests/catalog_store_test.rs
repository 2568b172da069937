//! Integration tests for the redb-backed catalog store

use coupe::config::{StorageBackendKind, StorageConfig};
use coupe::core::catalog::CatalogStore;
use coupe::domain::{NewRecord, RecordId, RecordPatch};
use std::collections::HashSet;
use tempfile::TempDir;

fn drink(name: &str, ingredients: &str) -> NewRecord {
    NewRecord::builder()
        .name(name)
        .ingredients(ingredients)
        .image_url("data:image/jpeg;base64,/9j/4AAQ")
        .file_name(format!("{}.jpg", name.to_lowercase()))
        .build()
        .unwrap()
}

async fn open(dir: &TempDir) -> CatalogStore {
    let store = CatalogStore::open_file(dir.path().join("catalog.redb"));
    store.init().await.unwrap();
    store
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let id = {
        let store = open(&dir).await;
        store
            .add(drink("Daiquiri", "light rum, lime"))
            .await
            .unwrap()
    };

    let store = open(&dir).await;
    let record = store.get(id).await.unwrap().unwrap();
    assert_eq!(record.name, "Daiquiri");
    assert_eq!(record.file_name, "daiquiri.jpg");
}

#[tokio::test]
async fn test_ids_not_reused_after_delete_or_clear() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;

    let first = store.add(drink("Gimlet", "gin")).await.unwrap();
    store.delete(first).await.unwrap();
    let second = store.add(drink("Gimlet", "gin")).await.unwrap();
    store.clear().await.unwrap();
    drop(store);

    let store = open(&dir).await;
    let third = store.add(drink("Gimlet", "gin")).await.unwrap();

    let ids: HashSet<RecordId> = [first, second, third].into_iter().collect();
    assert_eq!(ids.len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_get_distinct_ids() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.add(drink(&format!("Drink {i}"), "rum")).await
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap().unwrap());
    }

    assert_eq!(ids.len(), 16);
    assert_eq!(store.count().await.unwrap(), 16);
}

#[tokio::test]
async fn test_get_all_in_ascending_id_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;

    let mut expected = Vec::new();
    for name in ["Negroni", "Aviation", "Martini"] {
        expected.push(store.add(drink(name, "gin")).await.unwrap());
    }

    let ids: Vec<RecordId> = store.get_all().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_search_on_redb() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir).await;
    let daiquiri = store
        .add(drink("Daiquiri", "light rum, lime"))
        .await
        .unwrap();
    store.add(drink("Negroni", "gin, campari")).await.unwrap();

    let hits = store.search("RUM").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, daiquiri);

    assert_eq!(store.search("").await.unwrap(), store.get_all().await.unwrap());
}

#[tokio::test]
async fn test_update_persists() {
    let dir = TempDir::new().unwrap();

    let id = {
        let store = open(&dir).await;
        let id = store.add(drink("Gimlet", "gin, lime")).await.unwrap();
        store
            .update(id, RecordPatch::new().with_ingredients("gin, lime cordial"))
            .await
            .unwrap();
        id
    };

    let store = open(&dir).await;
    let record = store.get(id).await.unwrap().unwrap();
    assert_eq!(record.ingredients, "gin, lime cordial");
    assert!(record.updated_at >= record.created_at);
}

#[tokio::test]
async fn test_operations_before_init_fail() {
    let dir = TempDir::new().unwrap();
    let store = CatalogStore::open_file(dir.path().join("catalog.redb"));

    let err = store.add(drink("Gimlet", "gin")).await.unwrap_err();
    assert!(err.is_storage_unavailable());
    assert!(!dir.path().join("catalog.redb").exists());
}

#[tokio::test]
async fn test_store_from_config() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        backend: StorageBackendKind::Redb,
        path: dir
            .path()
            .join("nested")
            .join("catalog.redb")
            .to_string_lossy()
            .into_owned(),
    };

    let store = CatalogStore::from_config(&config);
    store.init().await.unwrap();
    store.init().await.unwrap();

    assert_eq!(store.backend_name(), "redb");
    assert!(dir.path().join("nested").join("catalog.redb").exists());
}
