//! Persistent blob cache for fetched resources.
//!
//! One sled database holds a single `files` tree mapping a resource locator
//! (byte-exact, never normalized) to its payload and metadata. The layout is
//! versioned by a single integer; see [`SCHEMA_VERSION`].
//!
//! Entries are replaced on write and never expire.
//!
//! # Example
//!
//! ```no_run
//! use geoload_store::BlobCache;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), geoload_store::StorageError> {
//! let cache = BlobCache::new("/tmp/geoload-cache");
//! cache.put("https://example.com/a.tif", b"II*\0", &json!({"kind": "raster"})).await?;
//! let entry = cache.get("https://example.com/a.tif").await?;
//! assert!(entry.is_some());
//! # Ok(())
//! # }
//! ```

pub use self::cache::{BlobCache, StoreState};
pub use self::entry::CacheEntry;
pub use self::error::{Result, StorageError};
pub use self::schema::SCHEMA_VERSION;

mod cache;
mod entry;
mod error;
mod schema;
