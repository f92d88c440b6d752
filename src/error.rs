//! Error types for qreye operations

use thiserror::Error;

/// Result type alias using qreye's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qreye operations
#[derive(Error, Debug)]
pub enum Error {
    /// The matrix source could not encode the payload
    #[error("Failed to encode QR matrix: {0}")]
    EncodingFailure(String),

    /// Output size or matrix side resolves to zero, leaving cell size undefined
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A render or style parameter is outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Module data handed over by a matrix source is not a square grid
    #[error("Malformed module matrix: {0}")]
    MalformedMatrix(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "raster")]
impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::EncodingFailure(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
