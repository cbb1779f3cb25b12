//! Surface size model
//!
//! Tracks the four sizes a paint surface juggles. The *view* is the on-screen
//! area, the *source* is the background image, the *active* area is where
//! strokes land (the backing raster), and the *output* is what export
//! produces. Active and output are derived and recomputed on every change.

use paintview_image::contain_size;

/// Integer pixel dimensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeModel {
    view: Size,
    source: Size,
    requested: Size,
    active: Size,
    output: Size,
}

impl SizeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Size {
        self.view
    }

    pub fn source(&self) -> Size {
        self.source
    }

    pub fn requested(&self) -> Size {
        self.requested
    }

    pub fn active(&self) -> Size {
        self.active
    }

    pub fn output(&self) -> Size {
        self.output
    }

    /// Whether a background image is loaded
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }

    pub fn set_view(&mut self, width: u32, height: u32) {
        self.view = Size::new(width, height);
        self.recompute();
    }

    pub fn set_source(&mut self, width: u32, height: u32) {
        self.source = Size::new(width, height);
        self.recompute();
    }

    pub fn clear_source(&mut self) {
        self.set_source(0, 0);
    }

    /// Set the export size; a zero dimension is derived instead
    pub fn set_requested(&mut self, width: u32, height: u32) {
        self.requested = Size::new(width, height);
        self.recompute();
    }

    fn recompute(&mut self) {
        let (active, fallback) = if self.has_source() {
            let (w, h) = contain_size(
                self.source.width,
                self.source.height,
                self.view.width,
                self.view.height,
            );
            (Size::new(w, h), self.source)
        } else {
            (self.view, self.view)
        };
        self.active = active;
        self.output = Size::new(
            pick(self.requested.width, fallback.width),
            pick(self.requested.height, fallback.height),
        );
    }
}

fn pick(requested: u32, fallback: u32) -> u32 {
    if requested > 0 {
        requested
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_source_uses_view() {
        let mut sizes = SizeModel::new();
        sizes.set_view(400, 200);
        assert_eq!(sizes.active(), Size::new(400, 200));
        assert_eq!(sizes.output(), Size::new(400, 200));

        sizes.set_requested(200, 100);
        assert_eq!(sizes.active(), Size::new(400, 200));
        assert_eq!(sizes.output(), Size::new(200, 100));
    }

    #[test]
    fn test_source_is_contain_fitted() {
        let mut sizes = SizeModel::new();
        sizes.set_view(200, 120);
        sizes.set_source(100, 50);
        assert_eq!(sizes.active(), Size::new(200, 100));
        assert_eq!(sizes.output(), Size::new(100, 50));

        sizes.set_view(400, 200);
        assert_eq!(sizes.active(), Size::new(400, 200));
    }

    #[test]
    fn test_partial_request_mixes_with_source() {
        let mut sizes = SizeModel::new();
        sizes.set_source(640, 480);
        sizes.set_requested(320, 0);
        assert_eq!(sizes.output(), Size::new(320, 480));
        // no view yet: nothing to draw into
        assert!(sizes.active().is_empty());
    }

    #[test]
    fn test_active_fits_view_and_keeps_aspect() {
        let mut sizes = SizeModel::new();
        for (vw, vh, sw, sh) in [(333, 777, 1024, 768), (1080, 1920, 37, 91), (5, 5, 3000, 10)] {
            sizes.set_view(vw, vh);
            sizes.set_source(sw, sh);
            let active = sizes.active();
            assert!(active.width <= vw && active.height <= vh);
            let scale = paintview_image::contain_scale(sw, sh, vw, vh);
            assert!((active.width as f32 - scale * sw as f32).abs() <= 1.0);
            assert!((active.height as f32 - scale * sh as f32).abs() <= 1.0);
        }
    }

    #[test]
    fn test_clear_source_reverts_to_view() {
        let mut sizes = SizeModel::new();
        sizes.set_view(300, 300);
        sizes.set_source(100, 50);
        assert!(sizes.has_source());
        sizes.clear_source();
        assert_eq!(sizes.active(), Size::new(300, 300));
        assert_eq!(sizes.source(), Size::ZERO);
    }
}
