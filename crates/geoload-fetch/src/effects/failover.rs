//! Direct-then-proxy failover.
//!
//! Candidates are attempted strictly one after another: the proxied request
//! is never issued while the direct one is still pending, and never issued at
//! all when the direct one succeeds.

use tracing::{debug, warn};

use crate::core::{Decode, is_remote};
use crate::data::{FetchCandidate, ProxySettings, Resolved};
use crate::effects::http::HttpClient;
use crate::error::{AttemptError, AttemptFailure, FetchError, Result};

/// Resolves a locator by trying each [`FetchCandidate`] in order.
pub struct FailoverFetcher<C: HttpClient> {
    pub(crate) client: C,
    settings:          ProxySettings,
}

impl<C: HttpClient> FailoverFetcher<C> {
    /// Create a fetcher over `client`, rewriting through `settings.proxy_url`.
    pub fn new(client: C, settings: ProxySettings) -> Self { Self { client, settings } }

    pub fn settings(&self) -> &ProxySettings { &self.settings }

    pub fn client(&self) -> &C { &self.client }

    /// The candidates `resolve` would try for `locator`, in order.
    pub fn candidates(&self, locator: &str) -> Vec<FetchCandidate> {
        FetchCandidate::list(locator, &self.settings)
    }

    /// Fetch `locator` and decode it with `decoder`.
    ///
    /// Returns the first candidate whose request completes with a 2xx status
    /// and whose body `decoder` accepts. When every candidate fails the error
    /// is [`FetchError::NetworkExhausted`] carrying the last failure.
    pub async fn resolve<D: Decode>(
        &self,
        locator: &str,
        decoder: &D,
    ) -> Result<Resolved<D::Output>> {
        if !is_remote(locator) {
            return Err(FetchError::InvalidLocator(locator.to_owned()));
        }

        let candidates = self.candidates(locator);
        let attempts = candidates.len();
        let mut last = None;

        for candidate in candidates {
            debug!(origin = %candidate.origin, url = %candidate.url, "attempting fetch candidate");

            match self.attempt(&candidate, decoder).await {
                Ok(resolved) => {
                    debug!(origin = %candidate.origin, locator, "fetch candidate succeeded");
                    return Ok(resolved);
                }
                Err(error) => {
                    warn!(origin = %candidate.origin, url = %candidate.url, %error, "fetch candidate failed");
                    last = Some(AttemptFailure { candidate, error });
                }
            }
        }

        match last {
            Some(last) => Err(FetchError::NetworkExhausted {
                locator: locator.to_owned(),
                attempts,
                last: Box::new(last),
            }),
            None => Err(FetchError::InvalidLocator(locator.to_owned())),
        }
    }

    async fn attempt<D: Decode>(
        &self,
        candidate: &FetchCandidate,
        decoder: &D,
    ) -> std::result::Result<Resolved<D::Output>, AttemptError> {
        let response = self
            .client
            .get(&candidate.url)
            .await
            .map_err(|e| AttemptError::Network(e.to_string()))?;

        if !response.is_success() {
            return Err(AttemptError::Status(response.status));
        }

        let value = decoder.decode(&response).map_err(AttemptError::Decode)?;

        Ok(Resolved {
            value,
            candidate: candidate.clone(),
            status: response.status,
            content_length: response.body.len() as u64,
            content_type: response.content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::core::{Json, RawBytes, decode_fn};
    use crate::data::{HttpResponse, Origin};
    use crate::error::DecodeError;

    // Mock error type that implements std::error::Error
    #[derive(Debug)]
    struct MockError(String);

    impl std::fmt::Display for MockError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for MockError {}

    // Mock HTTP client: unknown URLs fail at the transport level
    #[derive(Default)]
    struct MockHttpClient {
        routes:   HashMap<String, HttpResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        fn route(mut self, url: &str, response: HttpResponse) -> Self {
            self.routes.insert(url.to_owned(), response);
            self
        }

        fn requests(&self) -> Vec<String> { self.requests.lock().unwrap().clone() }
    }

    impl HttpClient for MockHttpClient {
        type Error = MockError;

        async fn get(&self, url: &str) -> std::result::Result<HttpResponse, Self::Error> {
            self.requests.lock().unwrap().push(url.to_owned());
            self.routes
                .get(url)
                .cloned()
                .ok_or_else(|| MockError(format!("connection refused: {url}")))
        }
    }

    const LOCATOR: &str = "https://example.com/raster.tif";
    const PROXIED: &str = "https://corsproxy.io/https://example.com/raster.tif";

    fn fetcher(client: MockHttpClient) -> FailoverFetcher<MockHttpClient> {
        FailoverFetcher::new(client, ProxySettings::new("https://corsproxy.io"))
    }

    #[tokio::test]
    async fn test_direct_success_skips_proxy() {
        let client = MockHttpClient::default()
            .route(LOCATOR, HttpResponse::new(200, "direct"))
            .route(PROXIED, HttpResponse::new(200, "proxied"));
        let fetcher = fetcher(client);

        let resolved = fetcher.resolve(LOCATOR, &RawBytes).await.unwrap();

        assert_eq!(resolved.value.as_ref(), b"direct");
        assert_eq!(resolved.candidate.origin, Origin::Direct);
        assert_eq!(fetcher.client().requests(), vec![LOCATOR.to_owned()]);
    }

    #[tokio::test]
    async fn test_network_error_falls_over_to_proxy() {
        let client = MockHttpClient::default().route(PROXIED, HttpResponse::new(200, "proxied"));
        let fetcher = fetcher(client);

        let resolved = fetcher.resolve(LOCATOR, &RawBytes).await.unwrap();

        assert_eq!(resolved.value.as_ref(), b"proxied");
        assert_eq!(resolved.candidate.origin, Origin::Proxied);
        assert_eq!(resolved.candidate.url, PROXIED);
        assert_eq!(
            fetcher.client().requests(),
            vec![LOCATOR.to_owned(), PROXIED.to_owned()]
        );
    }

    #[tokio::test]
    async fn test_error_status_falls_over_to_proxy() {
        let client = MockHttpClient::default()
            .route(LOCATOR, HttpResponse::new(403, "forbidden"))
            .route(PROXIED, HttpResponse::new(200, "ok"));
        let fetcher = fetcher(client);

        let resolved = fetcher.resolve(LOCATOR, &RawBytes).await.unwrap();
        assert_eq!(resolved.candidate.origin, Origin::Proxied);
    }

    #[tokio::test]
    async fn test_decode_failure_falls_over_to_proxy() {
        let client = MockHttpClient::default()
            .route(LOCATOR, HttpResponse::new(200, "<html>login</html>"))
            .route(PROXIED, HttpResponse::new(200, r#"{"type":"FeatureCollection"}"#));
        let fetcher = fetcher(client);

        let resolved = fetcher
            .resolve(LOCATOR, &Json::<serde_json::Value>::new())
            .await
            .unwrap();

        assert_eq!(resolved.value["type"], "FeatureCollection");
        assert_eq!(resolved.candidate.origin, Origin::Proxied);
    }

    #[tokio::test]
    async fn test_exhausted_carries_last_failure() {
        let client = MockHttpClient::default()
            .route(LOCATOR, HttpResponse::new(500, ""))
            .route(PROXIED, HttpResponse::new(200, "not a number"));
        let fetcher = fetcher(client);
        let decoder = decode_fn(|response: &HttpResponse| {
            std::str::from_utf8(&response.body)
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .ok_or_else(|| DecodeError::new("expected a number"))
        });

        let err = fetcher.resolve(LOCATOR, &decoder).await.unwrap_err();

        match &err {
            FetchError::NetworkExhausted {
                locator,
                attempts,
                last,
            } => {
                assert_eq!(locator, LOCATOR);
                assert_eq!(*attempts, 2);
                assert_eq!(last.candidate.origin, Origin::Proxied);
                assert_eq!(
                    last.error,
                    AttemptError::Decode(DecodeError::new("expected a number"))
                );
            }
            other => panic!("expected NetworkExhausted, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.last_failure().unwrap().candidate.url, PROXIED);
    }

    #[tokio::test]
    async fn test_unreachable_everywhere() {
        let fetcher = fetcher(MockHttpClient::default());

        let err = fetcher.resolve(LOCATOR, &RawBytes).await.unwrap_err();

        let last = err.last_failure().unwrap();
        assert!(matches!(last.error, AttemptError::Network(_)));
        assert_eq!(fetcher.client().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_relative_locator_is_rejected_without_requests() {
        let fetcher = fetcher(MockHttpClient::default());

        let err = fetcher.resolve("rasters/local.tif", &RawBytes).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidLocator(_)));
        assert!(fetcher.client().requests().is_empty());
    }
}
