use std::io;
use std::path::PathBuf;

use geoload_fetch::FetchError;
use geoload_raster::RasterError;
use geoload_store::StorageError;

use crate::settings::SettingsError;

/// Coarse classification for display at the UI boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NetworkExhausted,
    Storage,
    Parse,
    Configuration,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    NetworkExhausted(FetchError),

    #[error("cache storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Configuration(String),

    #[error("cannot read local file {}: {source}", .path.display())]
    LocalFile {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::NetworkExhausted(_) => ErrorKind::NetworkExhausted,
            LoadError::Storage(_) => ErrorKind::Storage,
            LoadError::Parse(_) => ErrorKind::Parse,
            LoadError::Configuration(_) | LoadError::LocalFile { .. } | LoadError::Settings(_) => {
                ErrorKind::Configuration
            }
        }
    }
}

impl From<FetchError> for LoadError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::NetworkExhausted { .. } => LoadError::NetworkExhausted(e),
            FetchError::InvalidLocator(_) | FetchError::Client(_) => {
                LoadError::Configuration(e.to_string())
            }
        }
    }
}

impl From<RasterError> for LoadError {
    fn from(e: RasterError) -> Self { LoadError::Parse(e.to_string()) }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self { LoadError::Parse(format!("invalid JSON payload: {e}")) }
}

pub type Result<T> = std::result::Result<T, LoadError>;
