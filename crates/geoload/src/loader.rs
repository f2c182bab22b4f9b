use std::fmt;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use geoload_fetch::{Decode, FailoverFetcher, HttpClient, HttpResponse, Origin, ProxySettings, is_remote};
use geoload_store::{BlobCache, CacheEntry};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::kind::{ResourceKind, content_type_for};

/// Where a [`ResolvedResource`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOrigin {
    Cache,
    Direct,
    Proxied,
    /// Read from a file under the loader's local root.
    Local,
}

impl ResourceOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceOrigin::Cache => "cache",
            ResourceOrigin::Direct => "direct",
            ResourceOrigin::Proxied => "proxied",
            ResourceOrigin::Local => "local",
        }
    }
}

impl From<Origin> for ResourceOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::Direct => ResourceOrigin::Direct,
            Origin::Proxied => ResourceOrigin::Proxied,
        }
    }
}

impl fmt::Display for ResourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone)]
pub struct ResolvedResource {
    pub locator:  String,
    pub payload:  Bytes,
    pub metadata: Value,
    pub origin:   ResourceOrigin,
}

impl ResolvedResource {
    fn from_entry(entry: CacheEntry) -> Self {
        Self {
            locator:  entry.key,
            payload:  entry.payload,
            metadata: entry.metadata,
            origin:   ResourceOrigin::Cache,
        }
    }

    /// Parse the payload as JSON, e.g. a GeoJSON feature collection.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> { Ok(serde_json::from_slice(&self.payload)?) }

    pub fn is_cached(&self) -> bool { self.origin == ResourceOrigin::Cache }
}

/// Cache-then-fetch orchestration.
///
/// Concurrent loads of the same uncached locator each go to the network and
/// each write the cache; the last write wins.
pub struct ResourceLoader<C: HttpClient> {
    fetcher:    FailoverFetcher<C>,
    cache:      BlobCache,
    local_root: Option<PathBuf>,
}

impl<C: HttpClient> ResourceLoader<C> {
    pub fn new(client: C, settings: ProxySettings, cache: BlobCache) -> Self {
        Self {
            fetcher: FailoverFetcher::new(client, settings),
            cache,
            local_root: None,
        }
    }

    /// Resolve non-URL locators as paths relative to `root`.
    ///
    /// Without a local root such locators are rejected.
    pub fn with_local_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_root = Some(root.into());
        self
    }

    pub fn fetcher(&self) -> &FailoverFetcher<C> { &self.fetcher }

    pub fn cache(&self) -> &BlobCache { &self.cache }

    pub fn local_root(&self) -> Option<&Path> { self.local_root.as_deref() }

    /// Return `locator` from the cache, or fetch, validate and store it.
    ///
    /// Remote entries are always keyed by `locator` itself, whichever
    /// candidate URL served it. Nothing is written when every candidate
    /// fails. Local paths are read from disk on every call and never cached.
    pub async fn load(&self, locator: &str, kind: ResourceKind) -> Result<ResolvedResource> {
        kind.check_locator(locator)?;

        if !is_remote(locator) {
            return self.load_local(locator, kind).await;
        }

        if let Some(entry) = self.cache.get(locator).await? {
            debug!(locator, %kind, "cache hit");
            return Ok(ResolvedResource::from_entry(entry));
        }
        debug!(locator, %kind, "cache miss");

        let resolved = self.fetcher.resolve(locator, &kind.decoder()).await?;
        let metadata = kind.metadata(&resolved);
        let origin = ResourceOrigin::from(resolved.candidate.origin);

        self.cache
            .put(locator, &resolved.value.bytes, &metadata)
            .await?;
        info!(
            locator,
            %origin,
            bytes = resolved.content_length,
            "stored resource"
        );

        Ok(ResolvedResource {
            locator: locator.to_owned(),
            payload: resolved.value.bytes,
            metadata,
            origin,
        })
    }

    /// Cache lookup only; never touches the network.
    pub async fn cached(&self, locator: &str) -> Result<Option<ResolvedResource>> {
        let entry = self.cache.get(locator).await?;
        Ok(entry.map(ResolvedResource::from_entry))
    }

    async fn load_local(&self, locator: &str, kind: ResourceKind) -> Result<ResolvedResource> {
        // Anything that parses as a URL here has a scheme other than http(s).
        if url::Url::parse(locator).is_ok() {
            return Err(LoadError::Configuration(format!(
                "unsupported locator scheme: {locator:?}"
            )));
        }
        let Some(root) = &self.local_root else {
            return Err(LoadError::Configuration(format!(
                "{locator:?} is not an http(s) URL and no local root is set"
            )));
        };

        let path = root.join(locator);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| LoadError::LocalFile {
                path: path.clone(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(LoadError::Parse(format!("{} is empty", path.display())));
        }

        let content_type = content_type_for(&path);
        let mut response = HttpResponse::new(200, bytes);
        response.content_type = content_type.map(str::to_owned);
        let payload = kind
            .decoder()
            .decode(&response)
            .map_err(|e| LoadError::Parse(format!("{}: {e}", path.display())))?;

        let metadata = kind.local_metadata(&payload, content_type, &path);
        debug!(path = %path.display(), %kind, bytes = payload.bytes.len(), "read local resource");

        Ok(ResolvedResource {
            locator: locator.to_owned(),
            payload: payload.bytes,
            metadata,
            origin: ResourceOrigin::Local,
        })
    }
}
