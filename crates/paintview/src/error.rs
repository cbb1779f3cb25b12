//! Surface error types

use paintview_platform::PlatformError;
use thiserror::Error;

/// Errors raised while configuring or attaching a paint surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Host properties could not be parsed
    #[error("invalid surface options: {0}")]
    Options(#[from] serde_json::Error),

    /// The UI thread could not be reached
    #[error("UI thread unavailable: {0}")]
    Platform(#[from] PlatformError),
}

/// Result type for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;
