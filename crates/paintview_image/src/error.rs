//! Image error types

use paintview_paint::PaintError;
use thiserror::Error;

/// Errors raised while loading or exporting images
#[derive(Error, Debug)]
pub enum ImageError {
    /// The image file could not be read
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes could not be decoded or encoded
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// A data URI carried invalid base64
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    /// A data URI was malformed
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The source was empty or otherwise unusable
    #[error("unsupported image source: {0}")]
    Unsupported(String),

    /// Raster construction or scaling failed
    #[error(transparent)]
    Raster(#[from] PaintError),
}

/// Result type for image operations
pub type Result<T> = std::result::Result<T, ImageError>;
