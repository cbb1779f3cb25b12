//! paintview image
//!
//! Image loading, contain-fit sizing and PNG export for the paint surface.
//!
//! # Features
//!
//! - Load background images from file paths, `file://` URIs, base64 data
//!   URIs, encoded bytes and raw RGBA
//! - Support for PNG, JPEG, GIF, WebP, BMP formats
//! - Contain-fit math used to size the drawable area
//! - Lossless PNG export at an arbitrary output resolution
//!
//! # Example
//!
//! ```ignore
//! use paintview_image::{export_png, ImageData, ImageSource};
//!
//! let data = ImageData::load(ImageSource::from_uri("file:///sdcard/face.png"))?;
//! let raster = data.to_raster()?;
//! let png = export_png(&raster, 640, 480)?;
//! ```

mod error;
mod export;
mod fit;
mod loader;
mod source;

pub use error::{ImageError, Result};
pub use export::{encode_png, export_png, ExportedImage};
pub use fit::{contain_scale, contain_size};
pub use loader::ImageData;
pub use source::{ImageFormat, ImageSource};
