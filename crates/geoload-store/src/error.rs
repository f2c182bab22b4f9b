use std::convert::Infallible;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to open cache store: {0}")]
    Open(#[source] sled::Error),

    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("transaction failed to commit: {0}")]
    Transaction(#[from] sled::transaction::TransactionError<Infallible>),

    #[error("corrupted cache record: {0}")]
    Codec(#[from] postcard::Error),

    #[error("invalid cache metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("schema version record has {0} bytes, expected 4")]
    MalformedSchema(usize),

    #[error("cache schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

pub type Result<T> = std::result::Result<T, StorageError>;
