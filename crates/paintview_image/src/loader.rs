//! Image decoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use paintview_paint::Raster;

use crate::error::{ImageError, Result};
use crate::source::{ImageFormat, ImageSource};

/// A decoded image: straight-alpha RGBA8 pixels
#[derive(Clone, PartialEq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for ImageData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageData")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl ImageData {
    /// Load and decode an image from any supported source
    pub fn load(source: impl Into<ImageSource>) -> Result<Self> {
        match source.into() {
            ImageSource::File(path) => {
                if path.as_os_str().is_empty() {
                    return Err(ImageError::Unsupported("empty path".to_string()));
                }
                let bytes = std::fs::read(&path)?;
                let image = decode(&bytes, None)?;
                tracing::debug!(
                    path = %path.display(),
                    width = image.width,
                    height = image.height,
                    "decoded image file"
                );
                Ok(image)
            }
            ImageSource::Base64(data) => {
                let (format, payload) = split_data_uri(&data)?;
                let bytes = STANDARD.decode(payload.trim())?;
                decode(&bytes, format)
            }
            ImageSource::Bytes { data, format } => decode(&data, format),
            ImageSource::Rgba {
                data,
                width,
                height,
            } => {
                let expected = width as usize * height as usize * 4;
                if width == 0 || height == 0 || data.len() != expected {
                    return Err(ImageError::Unsupported(format!(
                        "{}x{} RGBA with {} bytes",
                        width,
                        height,
                        data.len()
                    )));
                }
                Ok(Self {
                    width,
                    height,
                    pixels: data,
                })
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha RGBA8 pixel data
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Convert into a premultiplied raster
    pub fn to_raster(&self) -> Result<Raster> {
        Ok(Raster::from_rgba8(self.width, self.height, &self.pixels)?)
    }
}

fn decode(bytes: &[u8], format: Option<ImageFormat>) -> Result<ImageData> {
    let image = match format {
        Some(format) => image::load_from_memory_with_format(bytes, format.to_codec())?,
        None => image::load_from_memory(bytes)?,
    };
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Split `data:<mime>;base64,<payload>` into a format hint and the payload.
///
/// A bare base64 string (no `data:` prefix) is returned as-is with no hint.
fn split_data_uri(data: &str) -> Result<(Option<ImageFormat>, &str)> {
    let Some(rest) = data.strip_prefix("data:") else {
        return Ok((None, data));
    };
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::InvalidDataUri("missing ','".to_string()))?;
    let mut parts = header.split(';');
    let mime = parts.next().unwrap_or_default();
    if !parts.any(|p| p == "base64") {
        return Err(ImageError::InvalidDataUri(
            "only base64 payloads are supported".to_string(),
        ));
    }
    Ok((ImageFormat::from_mime(mime), payload))
}
