use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::header::RasterHeader;

/// Declared value range of a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandStats {
    pub minimum: f64,
    pub maximum: f64,
}

impl BandStats {
    /// Range used when the caller declares nothing.
    pub const PLACEHOLDER: BandStats = BandStats { minimum: 0.0, maximum: 100.0 };

    pub fn new(minimum: f64, maximum: f64) -> Self { Self { minimum, maximum } }

    /// Fill each missing bound from [`BandStats::PLACEHOLDER`] independently.
    pub fn declared(minimum: Option<f64>, maximum: Option<f64>) -> Self {
        Self {
            minimum: minimum.unwrap_or(Self::PLACEHOLDER.minimum),
            maximum: maximum.unwrap_or(Self::PLACEHOLDER.maximum),
        }
    }
}

impl Default for BandStats {
    fn default() -> Self { Self::PLACEHOLDER }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandDescriptor {
    /// 0-based sample position within a pixel.
    pub index:                usize,
    pub color_interpretation: Option<String>,
    #[serde(flatten)]
    pub stats:                BandStats,
}

/// One descriptor per sample in the first image of `raster`.
///
/// Every band gets `fallback` as its statistics, or the placeholder range
/// when the source declares none. Pixel values are never scanned.
pub fn extract_bands(raster: &[u8], fallback: Option<BandStats>) -> Result<Vec<BandDescriptor>> {
    let header = RasterHeader::read(raster)?;
    Ok(header.bands(fallback.unwrap_or_default()))
}

impl RasterHeader {
    pub fn bands(&self, fallback: BandStats) -> Vec<BandDescriptor> {
        (0..usize::from(self.samples_per_pixel))
            .map(|i| BandDescriptor {
                index:                i,
                color_interpretation: self.color_interpretation(i),
                stats:                fallback,
            })
            .collect()
    }

    fn color_interpretation(&self, index: usize) -> Option<String> {
        let base = self.base_interpretations()?;
        if let Some(name) = base.get(index) {
            return Some((*name).to_owned());
        }

        let extra = self.extra_samples.get(index - base.len()).copied();
        let name = match extra {
            Some(1 | 2) => "Alpha",
            _ => "Undefined",
        };
        Some(name.to_owned())
    }
}
