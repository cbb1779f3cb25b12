//! paintview
//!
//! A multi-touch freehand paint surface. Users draw with one or more fingers
//! over an optional background image; the host can clear the drawing, swap
//! the image, ask whether anything was drawn, and export the result as PNG at
//! a chosen resolution.
//!
//! # Example
//!
//! ```ignore
//! use paintview::{MainLooper, PaintView, SurfaceOptions};
//!
//! let looper = MainLooper::prepare();
//! let mut view = PaintView::new(looper.handle());
//! view.realize(SurfaceOptions::from_json(r#"{"requestedWidth": 200}"#)?)?;
//! view.on_size_changed(400, 200);
//! // ... touch events ...
//! let png = view.get_image();
//! ```

pub mod error;
pub mod message;
pub mod options;
pub mod path_buffer;
pub mod size;
pub mod surface;
pub mod view;

pub use error::{Result, SurfaceError};
pub use message::{PaintMessage, PaintReply};
pub use options::SurfaceOptions;
pub use path_buffer::{PathBuffer, MAX_TOUCH_POINTS};
pub use size::{Size, SizeModel};
pub use surface::PaintSurface;
pub use view::PaintView;

pub use paintview_image::ExportedImage;
pub use paintview_paint::{Color, Raster};
pub use paintview_platform::{MainLooper, MainThread, MotionAction, MotionEvent, TouchPointer};
