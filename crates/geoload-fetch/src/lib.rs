//! Failover fetching for resources that may be blocked by cross-origin rules.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and types
//! - [`core`] - Pure transformations (candidate building, decoding)
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Direct First**: the locator is always tried verbatim before any proxy
//! - **Single Proxy Rewrite**: one candidate behind the configured proxy base
//! - **Decode Gates Success**: an attempt only wins if the caller's decoder accepts it
//! - **Mechanism-Only**: no caching and no retries beyond the fixed candidate list
//!
//! # Example
//!
//! ```no_run
//! use geoload_fetch::{FailoverFetcher, ProxySettings, RawBytes, ReqwestClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = FailoverFetcher::new(ReqwestClient::new()?, ProxySettings::default());
//! let resolved = fetcher.resolve("https://example.com/raster.tif", &RawBytes).await?;
//! println!("{} bytes via {}", resolved.value.len(), resolved.candidate.origin);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use self::core::{Decode, DecodeFn, Json, RawBytes, decode_fn, is_remote, proxied_url};
pub use data::{
    DEFAULT_PROXY_URL, FetchCandidate, HttpResponse, Origin, ProxySettings, Resolved,
};
pub use effects::{FailoverFetcher, HttpClient};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{AttemptError, AttemptFailure, DecodeError, FetchError, Result};
