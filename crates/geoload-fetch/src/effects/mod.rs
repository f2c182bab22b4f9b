//! I/O operations: the HTTP client seam and the failover fetcher.

mod failover;
mod http;

pub use failover::FailoverFetcher;
pub use http::HttpClient;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
