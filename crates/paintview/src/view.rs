//! Host-facing paint view handle
//!
//! A [`PaintView`] can be used from any thread. Every call is carried to the
//! UI thread through the looper and the caller blocks until the surface has
//! answered, so callers see the same results they would on the UI thread.

use paintview_image::ExportedImage;
use paintview_paint::{Color, Raster};
use paintview_platform::{Confined, MainThread, MotionEvent, PlatformError};

use crate::error::Result;
use crate::message::{PaintMessage, PaintReply};
use crate::options::SurfaceOptions;
use crate::surface::PaintSurface;

/// Thread-safe handle to a [`PaintSurface`] living on the UI thread.
///
/// Calls made before [`PaintView::realize`] or after [`PaintView::destroy`]
/// are ignored; queries then report `None` or `false`.
#[derive(Debug, Clone)]
pub struct PaintView {
    main: MainThread,
    surface: Option<Confined<PaintSurface>>,
}

impl PaintView {
    pub fn new(main: MainThread) -> Self {
        Self {
            main,
            surface: None,
        }
    }

    /// Create the surface on the UI thread from host properties.
    ///
    /// A previously realized surface is destroyed first.
    pub fn realize(&mut self, options: SurfaceOptions) -> Result<()> {
        self.destroy();
        let surface = Confined::spawn(&self.main, move || PaintSurface::with_options(&options))?;
        tracing::debug!(id = surface.id(), "paint view realized");
        self.surface = Some(surface);
        Ok(())
    }

    /// Release the surface and everything it holds
    pub fn destroy(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        match surface.release() {
            Ok(_) => tracing::debug!(id = surface.id(), "paint view destroyed"),
            Err(err) => tracing::warn!(%err, "failed to release paint surface"),
        }
    }

    pub fn is_realized(&self) -> bool {
        self.surface.as_ref().is_some_and(Confined::is_alive)
    }

    pub fn set_stroke_width(&self, width: f32) {
        self.call("set_stroke_width", move |s| s.set_stroke_width(width));
    }

    pub fn set_stroke_color(&self, color: Color) {
        self.call("set_stroke_color", move |s| s.set_stroke_color(color));
    }

    /// Set the stroke color from a host color string
    pub fn set_stroke_color_str(&self, color: &str) {
        let color = color.to_owned();
        self.call("set_stroke_color", move |s| s.set_stroke_color_str(&color));
    }

    pub fn set_stroke_alpha(&self, alpha: i32) {
        self.call("set_stroke_alpha", move |s| s.set_stroke_alpha(alpha));
    }

    pub fn set_erase_mode(&self, erase: bool) {
        self.call("set_erase_mode", move |s| s.set_erase_mode(erase));
    }

    pub fn set_read_only(&self, read_only: bool) {
        self.call("set_read_only", move |s| s.set_read_only(read_only));
    }

    pub fn set_image(&self, image: Option<&str>) {
        self.send(PaintMessage::SetImage(image.map(str::to_owned)));
    }

    pub fn clear(&self) {
        self.send(PaintMessage::Clear);
    }

    pub fn get_dirty(&self) -> bool {
        self.send(PaintMessage::GetDirty)
            .is_some_and(PaintReply::into_dirty)
    }

    pub fn get_image(&self) -> Option<ExportedImage> {
        self.send(PaintMessage::GetImage)
            .and_then(PaintReply::into_image)
    }

    /// Forward a touch batch; `false` when there is no surface to take it
    pub fn on_touch_event(&self, event: MotionEvent) -> bool {
        self.call("on_touch_event", move |s| s.on_touch_event(&event))
            .unwrap_or(false)
    }

    pub fn on_size_changed(&self, width: u32, height: u32) {
        self.call("on_size_changed", move |s| s.on_size_changed(width, height));
    }

    pub fn take_redraw_request(&self) -> bool {
        self.call("take_redraw_request", PaintSurface::take_redraw_request)
            .unwrap_or(false)
    }

    /// Render a frame at the current view size
    pub fn render(&self) -> Option<Raster> {
        self.call("render", |s| s.render()).flatten()
    }

    /// Deliver a host message code.
    ///
    /// Unknown codes are not handled and return `None` without side effects.
    pub fn send_code(&self, what: i32, arg: Option<String>) -> Option<PaintReply> {
        let Some(message) = PaintMessage::from_code(what, arg) else {
            tracing::debug!(what, "unhandled message code");
            return None;
        };
        self.send(message)
    }

    /// Deliver a message and wait for the surface's reply
    pub fn send(&self, message: PaintMessage) -> Option<PaintReply> {
        let Some(surface) = self.surface.as_ref() else {
            tracing::debug!(code = message.code(), "paint view not realized, ignoring message");
            return None;
        };
        match surface.send_message(message) {
            Ok(reply) => reply,
            Err(err) => {
                log_dropped("send", &err);
                None
            }
        }
    }

    fn call<R, F>(&self, op: &'static str, f: F) -> Option<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut PaintSurface) -> R + Send + 'static,
    {
        let Some(surface) = self.surface.as_ref() else {
            tracing::debug!(op, "paint view not realized, ignoring");
            return None;
        };
        match surface.with(f) {
            Ok(result) => Some(result),
            Err(err) => {
                log_dropped(op, &err);
                None
            }
        }
    }
}

fn log_dropped(op: &str, err: &PlatformError) {
    match err {
        PlatformError::Released(_) => tracing::debug!(op, "paint view destroyed, ignoring"),
        _ => tracing::warn!(op, %err, "paint view call failed"),
    }
}
