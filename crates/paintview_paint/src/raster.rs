//! Raster backing store
//!
//! A mutable premultiplied RGBA pixel buffer. Finalized strokes and the
//! scaled background image live here between frames.

use tiny_skia::{
    BlendMode, ColorU8, FilterQuality, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use crate::color::Color;
use crate::error::{PaintError, Result};
use crate::paint::PaintState;
use crate::path::Path;

/// A premultiplied RGBA raster
#[derive(Clone, PartialEq)]
pub struct Raster {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Raster {
    /// Create a fully transparent raster
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(PaintError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    /// Create a raster from straight (non-premultiplied) RGBA8 pixels
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PaintError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        let mut raster = Self::new(width, height)?;
        for (dst, src) in raster
            .pixmap
            .pixels_mut()
            .iter_mut()
            .zip(data.chunks_exact(4))
        {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(raster)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Replace every pixel with `color`, ignoring blending
    pub fn erase(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Stroke `path` with the given paint state.
    ///
    /// Returns `false` when the path has nothing to draw.
    pub fn stroke_path(&mut self, path: &Path, state: &PaintState) -> bool {
        let Some(path) = path.to_skia() else {
            return false;
        };
        self.pixmap.stroke_path(
            &path,
            &state.to_paint(),
            &state.to_stroke(),
            Transform::identity(),
            None,
        );
        true
    }

    /// Composite `src` over this raster with its top-left corner at `(x, y)`
    pub fn draw_raster(&mut self, src: &Raster, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            src.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Resample into a new raster of the given size.
    ///
    /// Uses bicubic filtering. `self` is left untouched.
    pub fn scaled(&self, width: u32, height: u32) -> Result<Raster> {
        if (width, height) == self.size() {
            return Ok(self.clone());
        }
        let mut out = Raster::new(width, height)?;
        let paint = PixmapPaint {
            opacity: 1.0,
            blend_mode: BlendMode::Source,
            quality: FilterQuality::Bicubic,
        };
        let transform = Transform::from_scale(
            width as f32 / self.width() as f32,
            height as f32 / self.height() as f32,
        );
        out.pixmap
            .draw_pixmap(0, 0, self.pixmap.as_ref(), &paint, transform, None);
        Ok(out)
    }

    /// Straight-alpha RGBA8 value of the pixel at `(x, y)`
    pub fn pixel_rgba8(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(demultiply)
    }

    /// Straight-alpha RGBA8 copy of the whole raster, row-major
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| demultiply(*p))
            .collect()
    }

    /// True when every pixel has zero alpha
    pub fn is_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Number of pixels with non-zero alpha
    pub fn covered_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }
}

fn demultiply(p: PremultipliedColorU8) -> [u8; 4] {
    let c = p.demultiply();
    [c.red(), c.green(), c.blue(), c.alpha()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal() -> Path {
        let mut path = Path::starting_at(10.0, 10.0);
        path.quad_to(10.0, 10.0, 30.0, 30.0);
        path
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            Raster::new(0, 10).unwrap_err(),
            PaintError::InvalidSize {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_from_rgba8_checks_length() {
        let err = Raster::from_rgba8(2, 2, &[0; 15]).unwrap_err();
        assert_eq!(
            err,
            PaintError::BufferLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_from_rgba8_round_trips_opaque_pixels() {
        let data = [255, 0, 0, 255, 0, 0, 255, 255];
        let raster = Raster::from_rgba8(2, 1, &data).unwrap();
        assert_eq!(raster.to_rgba8(), data.to_vec());
    }

    #[test]
    fn test_stroke_marks_pixels() {
        let mut raster = Raster::new(40, 40).unwrap();
        assert!(raster.is_transparent());
        assert!(raster.stroke_path(&diagonal(), &PaintState::default()));
        assert_eq!(raster.pixel_rgba8(20, 20), Some([0, 0, 0, 255]));
        assert_eq!(raster.pixel_rgba8(38, 2).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_lone_move_to_draws_nothing() {
        let mut raster = Raster::new(10, 10).unwrap();
        assert!(!raster.stroke_path(&Path::starting_at(5.0, 5.0), &PaintState::default()));
        assert!(raster.is_transparent());
    }

    #[test]
    fn test_erase_mode_clears_destination() {
        let mut raster = Raster::new(40, 40).unwrap();
        raster.erase(Color::RED);
        let mut state = PaintState::default();
        state.set_erase(true);
        raster.stroke_path(&diagonal(), &state);
        assert_eq!(raster.pixel_rgba8(20, 20).map(|p| p[3]), Some(0));
        assert_eq!(raster.pixel_rgba8(38, 2), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_scaled_preserves_content() {
        let mut raster = Raster::new(40, 40).unwrap();
        raster.erase(Color::BLUE);
        let scaled = raster.scaled(80, 20).unwrap();
        assert_eq!(scaled.size(), (80, 20));
        let [r, g, b, a] = scaled.pixel_rgba8(40, 10).unwrap();
        assert!(r < 5 && g < 5 && b > 250 && a > 250, "got {r},{g},{b},{a}");
        assert_eq!(raster.size(), (40, 40));
    }

    #[test]
    fn test_draw_raster_composites_at_origin() {
        let mut src = Raster::new(4, 4).unwrap();
        src.erase(Color::GREEN);
        let mut dst = Raster::new(8, 8).unwrap();
        dst.draw_raster(&src, 0, 0);
        assert_eq!(dst.pixel_rgba8(1, 1), Some([0, 255, 0, 255]));
        assert_eq!(dst.pixel_rgba8(6, 6).map(|p| p[3]), Some(0));
        assert_eq!(dst.covered_pixels(), 16);
    }
}
