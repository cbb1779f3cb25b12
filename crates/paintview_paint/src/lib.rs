//! paintview paint layer
//!
//! The raster side of the paint surface, independent of any platform.
//!
//! # Features
//!
//! - Colors with host-style string parsing (`#rrggbb`, `rgb(...)`, named colors)
//! - Stroke paths built from move-to and quadratic segments
//! - Paint state with a single source of truth for stroke alpha
//! - A premultiplied RGBA raster backing store with stroke, blit and
//!   high-quality rescale operations

pub mod color;
pub mod error;
pub mod paint;
pub mod path;
pub mod raster;

pub use color::Color;
pub use error::{PaintError, Result};
pub use paint::{PaintState, DEFAULT_STROKE_WIDTH};
pub use path::{Path, PathCommand, Point};
pub use raster::Raster;
