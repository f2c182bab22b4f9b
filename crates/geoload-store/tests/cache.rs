use geoload_store::{BlobCache, SCHEMA_VERSION, StoreState};
use serde_json::json;
use tempfile::tempdir;

#[tokio::test]
async fn test_round_trip_is_byte_identical() {
    let dir = tempdir().unwrap();
    let cache = BlobCache::new(dir.path().join("cache"));
    let payload: Vec<u8> = (0..=255u8).cycle().take(256 * 1024).collect();
    let metadata = json!({
        "kind": "raster",
        "content_type": "image/tiff",
        "bands": [{"band": 1, "minimum": 0.0, "maximum": 255.0}],
    });

    cache
        .put("https://example.com/raster.tif", &payload, &metadata)
        .await
        .unwrap();
    let entry = cache
        .get("https://example.com/raster.tif")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(entry.key, "https://example.com/raster.tif");
    assert_eq!(entry.payload.as_ref(), payload.as_slice());
    assert_eq!(entry.metadata, metadata);
}

#[tokio::test]
async fn test_identical_puts_leave_one_entry() {
    let dir = tempdir().unwrap();
    let cache = BlobCache::new(dir.path().join("cache"));

    for _ in 0..2 {
        cache.put("L", b"payload", &json!({"v": 1})).await.unwrap();
    }

    assert_eq!(cache.len().await.unwrap(), 1);
    let entry = cache.get("L").await.unwrap().unwrap();
    assert_eq!(entry.payload.as_ref(), b"payload");
    assert_eq!(entry.metadata, json!({"v": 1}));
}

#[tokio::test]
async fn test_missing_key_is_absent_not_error() {
    let dir = tempdir().unwrap();
    let cache = BlobCache::new(dir.path().join("cache"));

    assert!(cache.get("K").await.unwrap().is_none());
    assert!(!cache.contains("K").await.unwrap());
    assert!(cache.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_entries_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache");

    {
        let cache = BlobCache::new(&path);
        cache.put("persisted", b"bytes", &json!({"a": true})).await.unwrap();
    }

    let reopened = BlobCache::new(&path);
    assert_eq!(reopened.state(), StoreState::Unopened);

    let entry = reopened.get("persisted").await.unwrap().unwrap();
    assert_eq!(entry.payload.as_ref(), b"bytes");
    assert_eq!(entry.metadata, json!({"a": true}));
    assert_eq!(SCHEMA_VERSION, 1);
}

#[tokio::test]
async fn test_concurrent_puts_on_different_keys() {
    let dir = tempdir().unwrap();
    let cache = BlobCache::new(dir.path().join("cache"));

    let mut tasks = Vec::new();
    for i in 0..8u8 {
        let cache = cache.clone();
        tasks.push(tokio::spawn(async move {
            let key = format!("https://example.com/{i}.tif");
            cache.put(&key, &[i; 32], &json!({"i": i})).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(cache.len().await.unwrap(), 8);
    for i in 0..8u8 {
        let entry = cache
            .get(&format!("https://example.com/{i}.tif"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.payload.as_ref(), &[i; 32]);
        assert_eq!(entry.metadata, json!({"i": i}));
    }
}
