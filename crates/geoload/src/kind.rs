use std::ffi::OsStr;
use std::fmt;
use std::path::Path;

use bytes::Bytes;
use geoload_fetch::{Decode, DecodeError, HttpResponse, Resolved};
use geoload_raster::looks_like_tiff;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::{LoadError, Result};

const TIFF_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// What a source is expected to contain. Selects validation only; every kind
/// is returned as raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// GeoJSON.
    FeatureCollection,
    /// GeoTIFF.
    Raster,
    /// Any `image/*` response.
    Image,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::FeatureCollection => "geojson",
            ResourceKind::Raster => "raster",
            ResourceKind::Image => "image",
        }
    }

    /// Checks that need no I/O.
    ///
    /// A raster locator must name a `.tif`/`.tiff` file, the extensions that
    /// map to `image/tiff`.
    pub fn check_locator(&self, locator: &str) -> Result<()> {
        if *self != ResourceKind::Raster {
            return Ok(());
        }

        let path = url::Url::parse(locator)
            .map(|url| url.path().to_owned())
            .unwrap_or_else(|_| {
                locator
                    .split(['?', '#'])
                    .next()
                    .unwrap_or_default()
                    .to_owned()
            });
        let is_tiff = Path::new(&path)
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| TIFF_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

        if is_tiff {
            Ok(())
        } else {
            Err(LoadError::Configuration(
                "Invalid file type. Expected GeoTIFF (image/tiff).".to_owned(),
            ))
        }
    }

    pub fn decoder(&self) -> KindDecoder { KindDecoder(*self) }

    /// Metadata object stored next to a fetched payload.
    pub(crate) fn metadata(&self, resolved: &Resolved<Payload>) -> Value {
        self.describe(
            &resolved.value,
            resolved.content_type.as_deref(),
            resolved.candidate.origin.as_str(),
            ("fetched_from", &resolved.candidate.url),
        )
    }

    /// Metadata object for a payload read from disk.
    pub(crate) fn local_metadata(&self, payload: &Payload, content_type: Option<&str>, path: &Path) -> Value {
        let path = path.display().to_string();
        self.describe(payload, content_type, "local", ("path", &path))
    }

    fn describe(&self, payload: &Payload, content_type: Option<&str>, origin: &str, source: (&str, &str)) -> Value {
        let mut metadata = Map::new();
        metadata.insert("kind".into(), json!(self.as_str()));
        metadata.insert("content_type".into(), json!(content_type));
        metadata.insert("content_length".into(), json!(payload.bytes.len() as u64));
        metadata.insert("origin".into(), json!(origin));
        metadata.insert(source.0.into(), json!(source.1));
        metadata.extend(payload.details.clone());
        Value::Object(metadata)
    }
}

/// Content type implied by a file extension, for payloads without headers.
pub(crate) fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(OsStr::to_str)?.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "tif" | "tiff" => "image/tiff",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "json" | "geojson" => "application/geo+json",
        _ => return None,
    };
    Some(content_type)
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// A body accepted by a [`KindDecoder`].
#[derive(Debug, Clone)]
pub struct Payload {
    pub bytes:   Bytes,
    /// Kind specific entries merged into the stored metadata.
    pub details: Map<String, Value>,
}

/// Rejects bodies that do not look like the expected kind, so a proxy's
/// error page fails the attempt instead of being cached.
#[derive(Debug, Clone, Copy)]
pub struct KindDecoder(ResourceKind);

impl Decode for KindDecoder {
    type Output = Payload;

    fn decode(&self, response: &HttpResponse) -> std::result::Result<Payload, DecodeError> {
        let mut details = Map::new();

        match self.0 {
            ResourceKind::FeatureCollection => {
                let value: Value = serde_json::from_slice(&response.body)?;
                if value["type"] == "FeatureCollection" {
                    let count = value["features"].as_array().map_or(0, Vec::len);
                    details.insert("feature_count".into(), json!(count));
                }
            }
            ResourceKind::Raster => {
                if !looks_like_tiff(&response.body) {
                    return Err(DecodeError::new("body is not a TIFF file"));
                }
            }
            ResourceKind::Image => {
                let content_type = response.content_type.as_deref().unwrap_or_default();
                if !content_type.starts_with("image/") {
                    return Err(DecodeError::new(format!(
                        "expected an image content type, got {content_type:?}"
                    )));
                }
            }
        }

        Ok(Payload {
            bytes: response.body.clone(),
            details,
        })
    }
}
