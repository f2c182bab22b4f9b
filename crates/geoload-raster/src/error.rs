#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    #[error("cannot read raster header: {0}")]
    Parse(String),
}

impl From<tiff::TiffError> for RasterError {
    fn from(e: tiff::TiffError) -> Self { RasterError::Parse(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, RasterError>;
