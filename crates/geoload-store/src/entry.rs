use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A cached resource as handed to readers. Always an owned copy.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key:       String,
    pub payload:   Bytes,
    pub metadata:  Value,
    /// Milliseconds since the Unix epoch at write time.
    pub stored_at: u64,
}

impl CacheEntry {
    pub fn stored_at_time(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.stored_at)
    }
}

/// On-disk layout of one `files` record (postcard encoded).
///
/// Metadata is kept as JSON text since postcard cannot carry a
/// self-describing value.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct StoredRecord {
    pub payload:   Vec<u8>,
    pub metadata:  String,
    pub stored_at: u64,
}

impl StoredRecord {
    pub fn new(payload: &[u8], metadata: &Value) -> Result<Self> {
        Ok(Self {
            payload:   payload.to_vec(),
            metadata:  serde_json::to_string(metadata)?,
            stored_at: now_millis(),
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>> { Ok(postcard::to_stdvec(self)?) }

    pub fn decode(raw: &[u8]) -> Result<Self> { Ok(postcard::from_bytes(raw)?) }

    pub fn into_entry(self, key: &str) -> Result<CacheEntry> {
        Ok(CacheEntry {
            key:       key.to_owned(),
            payload:   Bytes::from(self.payload),
            metadata:  serde_json::from_str(&self.metadata)?,
            stored_at: self.stored_at,
        })
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
