use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use geoload_fetch::HttpClient;
use geoload_raster::{BandDescriptor, BandStats, extract_bands};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LoadError, Result};
use crate::kind::ResourceKind;
use crate::loader::ResourceLoader;

pub const NO_SOURCE_URL: &str = "No source URL found.";

/// One URL of a raster source with its declared value range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceUrl {
    pub url: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RasterSource {
    #[serde(default)]
    pub urls: Vec<SourceUrl>,
}

/// Band descriptors for the first URL of `source`.
///
/// The raster goes through `loader`, so a cached copy is reused. A parse
/// failure leaves that cached copy in place.
pub async fn band_info<C: HttpClient>(
    loader: &ResourceLoader<C>,
    source: Option<&RasterSource>,
) -> Result<Vec<BandDescriptor>> {
    let url = source
        .and_then(|source| source.urls.first())
        .filter(|url| !url.url.is_empty())
        .ok_or_else(|| LoadError::Configuration(NO_SOURCE_URL.to_owned()))?;

    let resource = loader.load(&url.url, ResourceKind::Raster).await?;
    let bands = extract_bands(&resource.payload, Some(BandStats::declared(url.min, url.max)))?;
    debug!(locator = %url.url, bands = bands.len(), "extracted band info");

    Ok(bands)
}

/// Lets a consumer that went away stop caring about a result still in
/// flight. The work itself is never aborted.
#[derive(Debug, Clone, Default)]
pub struct LateResult {
    ignored: Arc<AtomicBool>,
}

impl LateResult {
    pub fn new() -> Self { Self::default() }

    pub fn ignore(&self) { self.ignored.store(true, Ordering::Release); }

    pub fn is_ignored(&self) -> bool { self.ignored.load(Ordering::Acquire) }

    /// `Some(value)` unless [`LateResult::ignore`] was called on any clone.
    pub fn accept<T>(&self, value: T) -> Option<T> { (!self.is_ignored()).then_some(value) }
}
