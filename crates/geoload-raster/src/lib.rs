//! Band metadata for already-resolved GeoTIFF payloads.
//!
//! Everything here works on bytes in memory; nothing fetches.

pub use self::bands::{BandDescriptor, BandStats, extract_bands};
pub use self::error::{RasterError, Result};
pub use self::header::{RasterHeader, looks_like_tiff};

mod bands;
mod error;
mod header;
