//! Paint state applied to stroke operations

use tiny_skia::{BlendMode, LineCap, LineJoin, Paint, Stroke};

use crate::color::Color;

/// Stroke width used when the host does not set one, in view units
pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;

// Fixed rasterizer attributes. tiny-skia has no dither stage, so dithering
// is not represented here.
const ANTI_ALIAS: bool = true;
const LINE_CAP: LineCap = LineCap::Round;
const LINE_JOIN: LineJoin = LineJoin::Round;

/// Caller-configurable stroke attributes.
///
/// This is a plain value; the rasterizer `Paint` and `Stroke` are rebuilt
/// from it for every draw. Stroke alpha is kept separately from the color
/// and applied last, so changing color or compositing mode never loses it.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintState {
    color: Color,
    stroke_width: f32,
    alpha: u8,
    erase: bool,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
            alpha: 255,
            erase: false,
        }
    }
}

impl PaintState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn is_erasing(&self) -> bool {
        self.erase
    }

    /// Set the stroke color. Only the RGB channels are kept.
    pub fn set_color(&mut self, color: Color) {
        self.color = color.opaque();
    }

    /// Set the stroke width.
    ///
    /// Negative and non-finite widths are rejected and leave the state
    /// unchanged; returns whether the width was accepted.
    pub fn set_stroke_width(&mut self, width: f32) -> bool {
        if !width.is_finite() || width < 0.0 {
            return false;
        }
        self.stroke_width = width;
        true
    }

    /// Set the stroke alpha, clamped to `0..=255`
    pub fn set_alpha(&mut self, alpha: i32) {
        self.alpha = alpha.clamp(0, 255) as u8;
    }

    /// Switch between source-clearing and source-over compositing
    pub fn set_erase(&mut self, erase: bool) {
        self.erase = erase;
    }

    /// Compositing mode applied to strokes
    pub fn blend_mode(&self) -> BlendMode {
        if self.erase {
            BlendMode::Clear
        } else {
            BlendMode::SourceOver
        }
    }

    /// Build the rasterizer paint
    pub fn to_paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = ANTI_ALIAS;
        paint.blend_mode = self.blend_mode();
        let [r, g, b, _] = self.color.to_rgba8();
        paint.set_color_rgba8(r, g, b, self.alpha);
        paint
    }

    /// Build the rasterizer stroke
    pub fn to_stroke(&self) -> Stroke {
        Stroke {
            width: self.stroke_width,
            line_cap: LINE_CAP,
            line_join: LINE_JOIN,
            ..Stroke::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = PaintState::default();
        assert_eq!(state.color(), Color::BLACK);
        assert_eq!(state.stroke_width(), 12.0);
        assert_eq!(state.alpha(), 255);
        assert!(!state.is_erasing());
        assert_eq!(state.blend_mode(), BlendMode::SourceOver);
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut state = PaintState::new();
        state.set_alpha(-20);
        assert_eq!(state.alpha(), 0);
        state.set_alpha(999);
        assert_eq!(state.alpha(), 255);
        state.set_alpha(64);
        assert_eq!(state.alpha(), 64);
    }

    #[test]
    fn test_negative_width_rejected() {
        let mut state = PaintState::new();
        assert!(!state.set_stroke_width(-1.0));
        assert!(!state.set_stroke_width(f32::NAN));
        assert_eq!(state.stroke_width(), DEFAULT_STROKE_WIDTH);
        assert!(state.set_stroke_width(30.0));
        assert_eq!(state.to_stroke().width, 30.0);
    }

    #[test]
    fn test_alpha_survives_color_and_mode_changes() {
        let mut state = PaintState::new();
        state.set_alpha(100);
        state.set_color(Color::RED.with_alpha(0.2));
        state.set_erase(true);
        state.set_erase(false);

        let paint = state.to_paint();
        let tiny_skia::Shader::SolidColor(color) = paint.shader else {
            panic!("expected a solid color shader");
        };
        assert_eq!(state.color(), Color::RED);
        assert!((color.alpha() - 100.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_erase_uses_clear() {
        let mut state = PaintState::new();
        state.set_erase(true);
        assert_eq!(state.to_paint().blend_mode, BlendMode::Clear);
        assert_eq!(state.to_stroke().line_cap, LineCap::Round);
        assert_eq!(state.to_stroke().line_join, LineJoin::Round);
    }
}
