//! Replay script handling
//!
//! A script is a TOML file with the surface's construction options, the
//! view size, and a list of steps:
//!
//! ```toml
//! [surface]
//! requestedWidth = 200
//! requestedHeight = 100
//!
//! [view]
//! width = 400
//! height = 200
//!
//! [[steps]]
//! op = "down"
//! id = 0
//! x = 10
//! y = 10
//! ```

use anyhow::{Context, Result};
use paintview::{MotionAction, MotionEvent, PaintView, SurfaceOptions, TouchPointer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize)]
pub struct Script {
    #[serde(default)]
    pub surface: SurfaceOptions,
    #[serde(default)]
    pub view: Option<ViewSize>,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Directory relative image paths resolve against
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ViewSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PointerSpec {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

/// One replayed host call
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Down {
        id: i32,
        x: f32,
        y: f32,
    },
    Move {
        id: i32,
        x: f32,
        y: f32,
    },
    Up {
        id: i32,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    /// Raw host touch batch
    Touch {
        action: i32,
        pointers: Vec<PointerSpec>,
    },
    StrokeWidth {
        value: f32,
    },
    StrokeColor {
        value: String,
    },
    StrokeAlpha {
        value: i32,
    },
    Erase {
        value: bool,
    },
    ReadOnly {
        value: bool,
    },
    /// Load an image; omit `path` to remove it
    Image {
        #[serde(default)]
        path: Option<String>,
    },
    Clear,
    Resize {
        width: u32,
        height: u32,
    },
}

impl Script {
    /// Load a script from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut script = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        script.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(script)
    }

    /// Parse a script from TOML text; relative paths resolve against the
    /// working directory
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Construction options with the image path resolved
    pub fn surface_options(&self) -> SurfaceOptions {
        let mut options = self.surface.clone();
        options.image = options.image.map(|uri| self.resolve(&uri));
        options
    }

    /// Drive `view` through the view size and every step
    pub fn replay(&self, view: &PaintView) {
        if let Some(size) = self.view {
            view.on_size_changed(size.width, size.height);
        }
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(index, ?step, "replaying step");
            self.apply(view, step);
        }
    }

    fn apply(&self, view: &PaintView, step: &Step) {
        match step {
            Step::Down { id, x, y } => {
                view.on_touch_event(MotionEvent::single(MotionAction::Down, *id, *x, *y));
            }
            Step::Move { id, x, y } => {
                view.on_touch_event(MotionEvent::single(MotionAction::Move, *id, *x, *y));
            }
            Step::Up { id, x, y } => {
                view.on_touch_event(MotionEvent::single(MotionAction::Up, *id, *x, *y));
            }
            Step::Touch { action, pointers } => {
                let pointers = pointers.iter().map(|p| TouchPointer::new(p.id, p.x, p.y));
                view.on_touch_event(MotionEvent::new(*action, pointers));
            }
            Step::StrokeWidth { value } => view.set_stroke_width(*value),
            Step::StrokeColor { value } => view.set_stroke_color_str(value),
            Step::StrokeAlpha { value } => view.set_stroke_alpha(*value),
            Step::Erase { value } => view.set_erase_mode(*value),
            Step::ReadOnly { value } => view.set_read_only(*value),
            Step::Image { path } => {
                let resolved = path.as_deref().map(|uri| self.resolve(uri));
                view.set_image(resolved.as_deref());
            }
            Step::Clear => view.clear(),
            Step::Resize { width, height } => view.on_size_changed(*width, *height),
        }
    }

    fn resolve(&self, uri: &str) -> String {
        if uri.is_empty() || uri.contains("://") || uri.starts_with("data:") {
            return uri.to_string();
        }
        let path = Path::new(uri);
        if path.is_absolute() {
            uri.to_string()
        } else {
            self.base_dir.join(path).to_string_lossy().into_owned()
        }
    }
}
