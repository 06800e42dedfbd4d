//! Error types for annotation file operations.

use thiserror::Error;

/// Errors that can occur while reading or writing annotation files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raster encoding or decoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The embedded image payload is not valid base64
    #[error("invalid embedded image data: {0}")]
    ImageData(#[from] base64::DecodeError),
}
