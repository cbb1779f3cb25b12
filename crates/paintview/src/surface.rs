//! Paint surface controller
//!
//! [`PaintSurface`] owns the backing raster, the in-flight paths and the paint
//! state. It lives on the UI thread; other threads reach it through
//! [`crate::PaintView`].
//!
//! Strokes are drawn in two stages. While a finger is down its path stays in
//! the [`PathBuffer`] and is painted over the backing on every frame. When the
//! finger lifts, or any paint attribute changes, the path is *finalized*:
//! rasterized into the backing with the paint state in effect at that moment.

use paintview_image::{export_png, ExportedImage, ImageData, ImageSource};
use paintview_paint::{Color, PaintState, Path, Raster};
use paintview_platform::{MessageHandler, MotionAction, MotionEvent, TouchPointer};

use crate::message::{PaintMessage, PaintReply};
use crate::options::SurfaceOptions;
use crate::path_buffer::PathBuffer;
use crate::size::{Size, SizeModel};

#[derive(Debug, Default)]
pub struct PaintSurface {
    sizes: SizeModel,
    backing: Option<Raster>,
    paths: PathBuffer,
    paint: PaintState,
    background: Option<Color>,
    read_only: bool,
    dirty: bool,
    redraw_requested: bool,
}

impl PaintSurface {
    /// An empty surface with default paint state and no view size yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a surface from host properties.
    ///
    /// Paint options are applied first, then the image is loaded.
    pub fn with_options(options: &SurfaceOptions) -> Self {
        let mut surface = Self::new();
        surface.set_requested_size(options.requested_width, options.requested_height);
        surface.set_stroke_color_str(&options.stroke_color);
        surface.set_stroke_width(options.stroke_width);
        surface.set_stroke_alpha(options.stroke_alpha);
        surface.set_read_only(options.read_only);
        surface.background = options.background_color.as_deref().and_then(|name| {
            let color = Color::parse(name);
            if color.is_none() {
                tracing::warn!(color = name, "unrecognised background color, ignoring");
            }
            color
        });
        if let Some(image) = options.image.as_deref() {
            surface.set_image(Some(image));
        }
        tracing::debug!(sizes = ?surface.sizes, "paint surface created");
        surface
    }

    // ---- queries ----

    pub fn sizes(&self) -> &SizeModel {
        &self.sizes
    }

    pub fn backing(&self) -> Option<&Raster> {
        self.backing.as_ref()
    }

    pub fn paths(&self) -> &PathBuffer {
        &self.paths
    }

    pub fn paint(&self) -> &PaintState {
        &self.paint
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether the user has drawn since the last clear or image load
    pub fn get_dirty(&self) -> bool {
        self.dirty
    }

    /// Export the backing raster at the output size as PNG.
    ///
    /// In-flight paths are not included and nothing is modified.
    pub fn get_image(&self) -> Option<ExportedImage> {
        let Some(backing) = self.backing.as_ref() else {
            tracing::debug!("no backing raster to export");
            return None;
        };
        let output = self.sizes.output();
        if output.is_empty() {
            tracing::debug!(?output, "output size is empty, nothing to export");
            return None;
        }
        match export_png(backing, output.width, output.height) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(%err, "failed to export image");
                None
            }
        }
    }

    // ---- paint attributes ----

    /// Set the stroke width; negative or non-finite widths are ignored
    pub fn set_stroke_width(&mut self, width: f32) {
        if !width.is_finite() || width < 0.0 {
            tracing::warn!(width, "ignoring invalid stroke width");
            return;
        }
        self.finalize_all();
        self.paint.set_stroke_width(width);
    }

    /// Set the stroke color; its alpha channel is ignored
    pub fn set_stroke_color(&mut self, color: Color) {
        self.finalize_all();
        self.paint.set_color(color);
    }

    /// Set the stroke color from a host color string, falling back to black
    pub fn set_stroke_color_str(&mut self, color: &str) {
        self.set_stroke_color(Color::parse_or_black(color));
    }

    /// Set the stroke alpha, clamped to `0..=255`
    pub fn set_stroke_alpha(&mut self, alpha: i32) {
        self.finalize_all();
        self.paint.set_alpha(alpha);
    }

    /// Switch strokes between painting and erasing
    pub fn set_erase_mode(&mut self, erase: bool) {
        self.finalize_all();
        self.paint.set_erase(erase);
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.finalize_all();
        self.read_only = read_only;
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background = color;
        self.request_redraw();
    }

    /// Set the export size; a zero dimension is derived instead
    pub fn set_requested_size(&mut self, width: u32, height: u32) {
        self.sizes.set_requested(width, height);
    }

    // ---- content ----

    /// Load or remove the background image.
    ///
    /// `None` and the empty string remove it. A load failure is logged and
    /// leaves the surface untouched.
    pub fn set_image(&mut self, image: Option<&str>) {
        match image.filter(|uri| !uri.is_empty()) {
            Some(uri) => {
                self.load_image(ImageSource::from_uri(uri));
            }
            None => self.remove_image(),
        }
    }

    /// Decode `source` and make it the new backing raster.
    ///
    /// Returns `false` when the image could not be loaded.
    pub fn load_image(&mut self, source: impl Into<ImageSource>) -> bool {
        let decoded = ImageData::load(source).and_then(|image| {
            let raster = image.to_raster()?;
            Ok((image.width(), image.height(), raster))
        });
        let (width, height, raster) = match decoded {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(%err, "failed to load image");
                return false;
            }
        };

        self.finalize_all();
        self.sizes.set_source(width, height);
        let active = self.sizes.active();
        self.backing = Some(if active.is_empty() {
            raster
        } else {
            match raster.scaled(active.width, active.height) {
                Ok(scaled) => scaled,
                Err(err) => {
                    tracing::warn!(%err, "failed to scale image, keeping it unscaled");
                    raster
                }
            }
        });
        self.dirty = false;
        self.request_redraw();
        tracing::info!(width, height, ?active, "background image loaded");
        true
    }

    /// Drop the background image and start over with a blank backing
    pub fn remove_image(&mut self) {
        self.finalize_all();
        self.sizes.clear_source();
        self.backing = None;
        self.ensure_backing(self.sizes.active());
        self.dirty = false;
        self.request_redraw();
    }

    /// Erase every stroke, including the background image pixels
    pub fn clear(&mut self) {
        self.finalize_all();
        if let Some(backing) = self.backing.as_mut() {
            backing.erase(Color::TRANSPARENT);
        }
        self.dirty = false;
        self.request_redraw();
    }

    // ---- host callbacks ----

    /// The view was laid out at a new size.
    ///
    /// The backing is resampled to the new active size; the source image is
    /// not reloaded. Zero-area sizes leave the backing alone.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.sizes.set_view(width, height);
        let active = self.sizes.active();
        if active.is_empty() {
            tracing::debug!(width, height, "empty active area, keeping backing");
            return;
        }
        let resized = match self.backing.as_ref() {
            Some(backing) => backing.scaled(active.width, active.height),
            None => Raster::new(active.width, active.height),
        };
        match resized {
            Ok(raster) => self.backing = Some(raster),
            Err(err) => tracing::warn!(%err, ?active, "failed to resize backing"),
        }
        self.request_redraw();
    }

    /// Feed a touch batch to the surface. Always reports the event handled.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if self.read_only {
            return true;
        }
        let Some(action) = event.action() else {
            tracing::debug!(raw = event.action, "ignoring unknown touch action");
            return true;
        };
        if !matches!(
            action,
            MotionAction::Down | MotionAction::Move | MotionAction::Up
        ) {
            tracing::debug!(?action, "ignoring touch action");
            return true;
        }
        for pointer in &event.pointers {
            if !PathBuffer::accepts(pointer.id) {
                tracing::debug!(id = pointer.id, "ignoring out-of-range pointer");
                continue;
            }
            self.apply_touch(action, pointer);
        }
        true
    }

    fn apply_touch(&mut self, action: MotionAction, pointer: &TouchPointer) {
        let TouchPointer { id, x, y } = *pointer;
        match action {
            MotionAction::Down => {
                if let Some(displaced) = self.paths.begin(id, x, y) {
                    self.commit(&displaced);
                }
            }
            MotionAction::Move => {
                self.paths.extend(id, x, y);
            }
            MotionAction::Up => {
                if let Some(path) = self.paths.take(id) {
                    self.commit(&path);
                }
            }
            _ => return,
        }
        self.dirty = true;
        self.request_redraw();
    }

    // ---- rendering ----

    /// Consume the pending redraw request, if any
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Render a frame: background, backing, then in-flight paths
    pub fn draw(&self, target: &mut Raster) {
        target.erase(self.background.unwrap_or(Color::TRANSPARENT));
        if let Some(backing) = self.backing.as_ref() {
            target.draw_raster(backing, 0, 0);
        }
        for path in self.paths.paths() {
            target.stroke_path(path, &self.paint);
        }
    }

    /// Render a frame at the current view size
    pub fn render(&self) -> Option<Raster> {
        let view = self.sizes.view();
        let mut frame = Raster::new(view.width, view.height).ok()?;
        self.draw(&mut frame);
        Some(frame)
    }

    // ---- internals ----

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn ensure_backing(&mut self, size: Size) {
        if self.backing.is_some() || size.is_empty() {
            return;
        }
        match Raster::new(size.width, size.height) {
            Ok(raster) => self.backing = Some(raster),
            Err(err) => tracing::warn!(%err, ?size, "failed to create backing"),
        }
    }

    /// Rasterize a released path into the backing
    fn commit(&mut self, path: &Path) {
        commit_path(self.backing.as_mut(), &self.paint, path);
    }

    /// Commit every in-flight path with the current paint state
    fn finalize_all(&mut self) {
        let Self {
            paths,
            backing,
            paint,
            ..
        } = self;
        for path in paths.drain() {
            commit_path(backing.as_mut(), paint, &path);
        }
    }
}

fn commit_path(backing: Option<&mut Raster>, paint: &PaintState, path: &Path) {
    match backing {
        Some(backing) => {
            backing.stroke_path(path, paint);
        }
        None => tracing::debug!("no backing raster, dropping stroke"),
    }
}

impl MessageHandler for PaintSurface {
    type Message = PaintMessage;
    type Reply = PaintReply;

    fn handle_message(&mut self, message: PaintMessage) -> Option<PaintReply> {
        let reply = match message {
            PaintMessage::Clear => {
                self.clear();
                PaintReply::Done
            }
            PaintMessage::SetImage(image) => {
                self.set_image(image.as_deref());
                PaintReply::Done
            }
            PaintMessage::GetImage => PaintReply::Image(self.get_image()),
            PaintMessage::GetDirty => PaintReply::Dirty(self.get_dirty()),
        };
        Some(reply)
    }
}
