use std::io::Cursor;

use serde::Serialize;
use tiff::decoder::Decoder;
use tiff::tags::Tag;
use tracing::debug;

use crate::error::{RasterError, Result};

const CLASSIC_LE: &[u8; 4] = b"II*\0";
const CLASSIC_BE: &[u8; 4] = b"MM\0*";
const BIG_LE: &[u8; 4] = b"II+\0";
const BIG_BE: &[u8; 4] = b"MM\0+";

/// Whether `bytes` starts with a classic or BigTIFF signature.
pub fn looks_like_tiff(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && matches!(&bytes[..4], s if s == CLASSIC_LE || s == CLASSIC_BE || s == BIG_LE || s == BIG_BE)
}

fn is_big_tiff(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && (&bytes[..4] == BIG_LE || &bytes[..4] == BIG_BE)
}

/// Summary of the first image directory, plus the directory count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RasterHeader {
    pub width:             u32,
    pub height:            u32,
    pub samples_per_pixel: u16,
    pub bits_per_sample:   Vec<u16>,
    pub sample_format:     Vec<u16>,
    pub photometric:       Option<u16>,
    pub extra_samples:     Vec<u16>,
    /// Full resolution image plus overviews and masks.
    pub image_count:       usize,
    pub big_tiff:          bool,
}

impl RasterHeader {
    /// Parse the header of an in-memory TIFF.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if !looks_like_tiff(bytes) {
            return Err(RasterError::Parse("missing TIFF signature".to_owned()));
        }

        let mut decoder = Decoder::new(Cursor::new(bytes))?;
        let (width, height) = decoder.dimensions()?;

        let samples_per_pixel = decoder
            .find_tag_unsigned::<u16>(Tag::SamplesPerPixel)?
            .unwrap_or(1);
        if samples_per_pixel == 0 {
            return Err(RasterError::Parse("image declares zero samples per pixel".to_owned()));
        }

        let bits_per_sample = decoder
            .find_tag_unsigned_vec::<u16>(Tag::BitsPerSample)?
            .unwrap_or_else(|| vec![1]);
        let sample_format = decoder
            .find_tag_unsigned_vec::<u16>(Tag::SampleFormat)?
            .unwrap_or_else(|| vec![1]);
        let photometric = decoder.find_tag_unsigned::<u16>(Tag::PhotometricInterpretation)?;
        let extra_samples = decoder
            .find_tag_unsigned_vec::<u16>(Tag::ExtraSamples)?
            .unwrap_or_default();

        let mut image_count = 1;
        while decoder.more_images() {
            decoder.next_image()?;
            image_count += 1;
        }

        let header = RasterHeader {
            width,
            height,
            samples_per_pixel,
            bits_per_sample,
            sample_format,
            photometric,
            extra_samples,
            image_count,
            big_tiff: is_big_tiff(bytes),
        };
        debug!(
            width,
            height,
            samples = samples_per_pixel,
            images = image_count,
            "read raster header"
        );

        Ok(header)
    }

    /// Band names implied by the photometric interpretation, before any
    /// extra samples.
    pub(crate) fn base_interpretations(&self) -> Option<&'static [&'static str]> {
        match self.photometric? {
            0 | 1 => Some(&["Gray"]),
            2 => Some(&["Red", "Green", "Blue"]),
            3 => Some(&["Palette"]),
            5 => Some(&["Cyan", "Magenta", "Yellow", "Black"]),
            6 => Some(&["Y", "Cb", "Cr"]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tiff::encoder::{TiffEncoder, colortype};

    use super::*;

    fn gray8(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        let mut encoder = TiffEncoder::new(&mut buf).unwrap();
        let data = vec![7u8; (width * height) as usize];
        encoder
            .write_image::<colortype::Gray8>(width, height, &data)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_signature_sniffing() {
        assert!(looks_like_tiff(b"II*\0rest"));
        assert!(looks_like_tiff(b"MM\0*rest"));
        assert!(looks_like_tiff(b"II+\0rest"));
        assert!(!looks_like_tiff(b"{\"type\":"));
        assert!(!looks_like_tiff(b"II"));
    }

    #[test]
    fn test_read_gray_header() {
        let header = RasterHeader::read(&gray8(16, 8)).unwrap();

        assert_eq!((header.width, header.height), (16, 8));
        assert_eq!(header.samples_per_pixel, 1);
        assert_eq!(header.bits_per_sample, vec![8]);
        assert_eq!(header.photometric, Some(1));
        assert_eq!(header.image_count, 1);
        assert!(!header.big_tiff);
    }

    #[test]
    fn test_counts_every_directory() {
        let mut buf = Cursor::new(Vec::new());
        let mut encoder = TiffEncoder::new(&mut buf).unwrap();
        encoder
            .write_image::<colortype::Gray8>(8, 8, &[0u8; 64])
            .unwrap();
        encoder
            .write_image::<colortype::Gray8>(4, 4, &[0u8; 16])
            .unwrap();

        let header = RasterHeader::read(&buf.into_inner()).unwrap();
        assert_eq!((header.width, header.height), (8, 8));
        assert_eq!(header.image_count, 2);
    }

    #[test]
    fn test_rejects_non_tiff() {
        let err = RasterHeader::read(b"<html>Access denied</html>").unwrap_err();
        assert_eq!(err, RasterError::Parse("missing TIFF signature".to_owned()));
    }

    #[test]
    fn test_rejects_truncated_header() {
        let bytes = gray8(4, 4);
        assert!(RasterHeader::read(&bytes[..12]).is_err());
    }
}
