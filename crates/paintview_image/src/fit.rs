//! Contain-fit sizing

/// Scale factor that fits an image inside a container without cropping,
/// preserving aspect ratio (CSS `object-fit: contain`).
///
/// Returns 0.0 when the image has no area.
pub fn contain_scale(
    image_width: u32,
    image_height: u32,
    container_width: u32,
    container_height: u32,
) -> f32 {
    if image_width == 0 || image_height == 0 {
        return 0.0;
    }
    let scale_w = container_width as f32 / image_width as f32;
    let scale_h = container_height as f32 / image_height as f32;
    scale_w.min(scale_h)
}

/// Whole-pixel size of an image contain-fitted into a container.
///
/// Dimensions are truncated, never rounded up, so the result always fits.
pub fn contain_size(
    image_width: u32,
    image_height: u32,
    container_width: u32,
    container_height: u32,
) -> (u32, u32) {
    let scale = contain_scale(image_width, image_height, container_width, container_height);
    (
        (scale * image_width as f32) as u32,
        (scale * image_height as f32) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_limited_by_height() {
        // 100x50 image in 200x200 container: width ratio 2, height ratio 4
        assert_eq!(contain_scale(100, 50, 200, 200), 2.0);
        assert_eq!(contain_size(100, 50, 200, 200), (200, 100));
    }

    #[test]
    fn test_contain_downscales() {
        assert_eq!(contain_size(1000, 500, 400, 400), (400, 200));
        assert_eq!(contain_size(300, 900, 400, 300), (100, 300));
    }

    #[test]
    fn test_empty_image() {
        assert_eq!(contain_scale(0, 50, 200, 200), 0.0);
        assert_eq!(contain_size(0, 50, 200, 200), (0, 0));
    }

    #[test]
    fn test_result_never_exceeds_container() {
        for (iw, ih) in [(3, 7), (640, 480), (17, 1), (1, 999)] {
            for (cw, ch) in [(101, 99), (1080, 1920), (5, 5)] {
                let (w, h) = contain_size(iw, ih, cw, ch);
                assert!(w <= cw && h <= ch, "{iw}x{ih} in {cw}x{ch} gave {w}x{h}");
            }
        }
    }
}
