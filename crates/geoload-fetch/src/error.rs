//! Error types for geoload-fetch.

use crate::data::FetchCandidate;

/// A decoder rejected a response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(String);

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }

    pub fn message(&self) -> &str { &self.0 }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self { Self(format!("invalid JSON: {err}")) }
}

/// Why a single candidate was discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("decode failed: {0}")]
    Decode(#[source] DecodeError),
}

/// A failed attempt together with the candidate it was made against.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} candidate {} failed: {error}", .candidate.origin, .candidate.url)]
pub struct AttemptFailure {
    pub candidate: FetchCandidate,
    #[source]
    pub error: AttemptError,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Every candidate failed. `last` is the final failure, kept for diagnosis.
    #[error("all {attempts} fetch candidates failed for {locator}")]
    NetworkExhausted {
        locator:  String,
        attempts: usize,
        #[source]
        last:     Box<AttemptFailure>,
    },

    #[error("invalid resource locator: {0:?}")]
    InvalidLocator(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// The last underlying failure when the candidate list was exhausted.
    pub fn last_failure(&self) -> Option<&AttemptFailure> {
        match self {
            FetchError::NetworkExhausted { last, .. } => Some(last),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
