//! PNG export

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use paintview_paint::Raster;

use crate::error::Result;

/// An exported raster: PNG bytes plus the dimensions they decode to
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ExportedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Encode a raster as a lossless 8-bit RGBA PNG.
///
/// Pixels are demultiplied first, so transparent and translucent areas
/// survive the round trip.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(
        &raster.to_rgba8(),
        raster.width(),
        raster.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Resample `raster` to `width x height` and encode it as PNG.
///
/// The resampled copy is dropped before returning; `raster` is not modified.
pub fn export_png(raster: &Raster, width: u32, height: u32) -> Result<ExportedImage> {
    let bytes = {
        let scaled = raster.scaled(width, height)?;
        encode_png(&scaled)?
    };
    Ok(ExportedImage {
        width,
        height,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintview_paint::Color;

    #[test]
    fn test_png_signature() {
        let raster = Raster::new(3, 2).unwrap();
        let bytes = encode_png(&raster).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_export_decodes_to_requested_size() {
        let mut raster = Raster::new(40, 20).unwrap();
        raster.erase(Color::RED.with_alpha(0.5));
        let exported = export_png(&raster, 10, 7).unwrap();
        assert_eq!((exported.width, exported.height), (10, 7));

        let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (10, 7));
        let px = decoded.get_pixel(5, 3).0;
        assert!(px[0] > 250 && px[1] < 5 && (120..=135).contains(&px[3]), "{px:?}");
    }

    #[test]
    fn test_export_zero_size_fails() {
        let raster = Raster::new(4, 4).unwrap();
        assert!(export_png(&raster, 0, 4).is_err());
    }
}
