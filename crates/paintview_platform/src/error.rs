//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The UI-thread looper has been dropped, so nothing will run posted work
    #[error("main looper is gone")]
    LooperGone,

    /// Posted work was dropped before it produced a result
    #[error("UI thread dropped the request without replying")]
    NoReply,

    /// The confined value has been released
    #[error("confined value {0} has been released")]
    Released(u64),

    /// The confined value is already in use further up the UI-thread stack
    #[error("confined value {0} is already borrowed")]
    Reentrant(u64),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
