//! Cache-then-fetch loading of remote geospatial resources.
//!
//! A [`ResourceLoader`] answers from the local [`BlobCache`] when it can and
//! otherwise resolves the locator over the network, directly first and then
//! through the configured CORS proxy, storing the result under the original
//! locator.
//!
//! ```no_run
//! # async fn run() -> Result<(), geoload::LoadError> {
//! use geoload::{BlobCache, ProxySettings, ReqwestClient, ResourceKind, ResourceLoader};
//!
//! let client = ReqwestClient::new().map_err(geoload::LoadError::from)?;
//! let loader = ResourceLoader::new(client, ProxySettings::default(), BlobCache::new("cache"));
//! let resource = loader
//!     .load("https://example.com/raster.tif", ResourceKind::Raster)
//!     .await?;
//! println!("{} bytes from {}", resource.payload.len(), resource.origin);
//! # Ok(())
//! # }
//! ```

pub mod settings;

mod band_info;
mod error;
mod kind;
mod loader;

pub use band_info::{LateResult, NO_SOURCE_URL, RasterSource, SourceUrl, band_info};
pub use error::{ErrorKind, LoadError, Result};
pub use geoload_fetch::{FetchCandidate, HttpClient, HttpResponse, Origin, ProxySettings, ReqwestClient};
pub use geoload_raster::{BandDescriptor, BandStats, RasterHeader};
pub use geoload_store::BlobCache;
pub use kind::{KindDecoder, Payload, ResourceKind};
pub use loader::{ResolvedResource, ResourceLoader, ResourceOrigin};
pub use settings::SettingsError;
