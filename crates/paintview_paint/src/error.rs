//! Paint error types

use thiserror::Error;

/// Errors raised by raster operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
    /// A raster cannot have a zero dimension
    #[error("invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Pixel data does not match the declared dimensions
    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}

/// Result type for paint operations
pub type Result<T> = std::result::Result<T, PaintError>;
