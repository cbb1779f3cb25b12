//! paintview platform layer
//!
//! Touch input types, the UI-thread looper and the thread-confinement bridge
//! every surface operation goes through.

pub mod confined;
pub mod error;
pub mod input;
pub mod looper;

pub use confined::{Confined, MessageHandler};
pub use error::{PlatformError, Result};
pub use input::{normalize_action, MotionAction, MotionEvent, TouchPointer};
pub use looper::{MainLooper, MainThread};
