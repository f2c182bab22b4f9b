use std::future::Future;

use crate::data::HttpResponse;

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed for failover fetching.
/// Implementations handle their own redirect following and timeouts. A
/// non-2xx status is not an error at this layer: it is returned in
/// [`HttpResponse::status`] and judged by the fetcher.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures (DNS, connection, TLS, timeout).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET request and buffer the whole response body.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = std::result::Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;
    use crate::error::{FetchError, Result};

    const USER_AGENT: &str = concat!("geoload/", env!("CARGO_PKG_VERSION"));

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone, Debug)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self> { Self::with_timeout(None) }

        /// Create a client whose requests give up after `timeout`.
        pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
            let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| FetchError::Client(e.to_string()))?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> std::result::Result<HttpResponse, Self::Error> {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = response.bytes().await?;

            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
