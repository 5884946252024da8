#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] trellis_core::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] crate::raster::RasterError),
}

pub type Result<T> = std::result::Result<T, Error>;
