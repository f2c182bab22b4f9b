use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::Value;
use sled::transaction::ConflictableTransactionResult;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::entry::{CacheEntry, StoredRecord};
use crate::error::{Result, StorageError};
use crate::schema::{self, FILES_TREE};

/// Where a [`BlobCache`] handle is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Opening,
    Ready,
}

impl StoreState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => StoreState::Opening,
            2 => StoreState::Ready,
            _ => StoreState::Unopened,
        }
    }
}

#[derive(Debug)]
struct Handle {
    db:    sled::Db,
    files: sled::Tree,
}

/// Keyed local store of fetched payloads.
///
/// Cloning is cheap and every clone shares the same lazily opened database.
#[derive(Debug, Clone)]
pub struct BlobCache {
    path:   PathBuf,
    handle: Arc<OnceCell<Handle>>,
    state:  Arc<AtomicU8>,
}

impl BlobCache {
    /// Create an unopened cache rooted at `path`. Nothing touches disk until
    /// the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:   path.into(),
            handle: Arc::new(OnceCell::new()),
            state:  Arc::new(AtomicU8::new(StoreState::Unopened as u8)),
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn state(&self) -> StoreState { StoreState::from_u8(self.state.load(Ordering::Acquire)) }

    /// Open the store, creating it and the `files` tree if absent.
    ///
    /// Idempotent: once ready, further calls only hand back the handle.
    pub async fn open(&self) -> Result<()> {
        self.handle().await.map(|_| ())
    }

    async fn handle(&self) -> Result<&Handle> {
        self.handle
            .get_or_try_init(|| async {
                self.state.store(StoreState::Opening as u8, Ordering::Release);
                let opened = open_handle(&self.path);
                let next = if opened.is_ok() {
                    StoreState::Ready
                } else {
                    StoreState::Unopened
                };
                self.state.store(next as u8, Ordering::Release);
                opened
            })
            .await
    }

    /// Store `payload` and `metadata` under `key`, replacing any previous
    /// entry. Resolves once the write is flushed to disk.
    pub async fn put(&self, key: &str, payload: &[u8], metadata: &Value) -> Result<()> {
        let handle = self.handle().await?;
        let record = StoredRecord::new(payload, metadata)?.encode()?;

        handle
            .files
            .transaction(|tx| -> ConflictableTransactionResult<(), Infallible> {
                tx.insert(key.as_bytes(), record.as_slice())?;
                Ok(())
            })?;
        handle.db.flush_async().await?;

        info!(key, bytes = payload.len(), "stored cache entry");
        Ok(())
    }

    /// Read the entry for `key`. A missing key is `Ok(None)`, not an error.
    pub async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let handle = self.handle().await?;

        let Some(raw) = handle.files.get(key.as_bytes())? else {
            debug!(key, "cache miss");
            return Ok(None);
        };

        let entry = StoredRecord::decode(&raw)?.into_entry(key)?;
        debug!(key, bytes = entry.payload.len(), "cache hit");
        Ok(Some(entry))
    }

    pub async fn contains(&self, key: &str) -> Result<bool> {
        let handle = self.handle().await?;
        Ok(handle.files.contains_key(key.as_bytes())?)
    }

    /// Number of cached entries.
    pub async fn len(&self) -> Result<usize> {
        let handle = self.handle().await?;
        Ok(handle.files.len())
    }

    pub async fn is_empty(&self) -> Result<bool> { Ok(self.len().await? == 0) }
}

fn open_handle(path: &Path) -> Result<Handle> {
    let db = sled::Config::new()
        .path(path)
        .use_compression(true)
        .open()
        .map_err(StorageError::Open)?;
    let files = db.open_tree(FILES_TREE).map_err(StorageError::Open)?;

    schema::ensure(&db, &files)?;
    debug!(path = %path.display(), entries = files.len(), "opened cache store");

    Ok(Handle { db, files })
}
