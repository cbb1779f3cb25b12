//! Construction options
//!
//! The host hands a property dictionary to the surface when it is created.
//! Keys follow the host's camelCase naming; every key is optional.

use paintview_paint::DEFAULT_STROKE_WIDTH;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceOptions {
    /// Background image: file path, `file://` URI or `data:` URI
    pub image: Option<String>,
    /// Export width; 0 or less derives it from the image or the view
    #[serde(deserialize_with = "requested_dimension")]
    pub requested_width: u32,
    /// Export height; 0 or less derives it from the image or the view
    #[serde(deserialize_with = "requested_dimension")]
    pub requested_height: u32,
    pub stroke_color: String,
    pub stroke_width: f32,
    /// Clamped to `0..=255`
    #[serde(deserialize_with = "stroke_alpha")]
    pub stroke_alpha: i32,
    pub read_only: bool,
    /// Fill drawn under the backing raster each frame
    pub background_color: Option<String>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            image: None,
            requested_width: 0,
            requested_height: 0,
            stroke_color: "black".to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_alpha: 255,
            read_only: false,
            background_color: None,
        }
    }
}

impl SurfaceOptions {
    /// Parse a JSON property dictionary
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Any JSON number, truncated toward zero like the host's integer coercion
fn host_int<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    Ok(number
        .as_i64()
        .or_else(|| number.as_f64().map(|f| f as i64))
        .unwrap_or_default())
}

fn requested_dimension<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<u32, D::Error> {
    let value = host_int(deserializer)?;
    Ok(value.clamp(0, u32::MAX as i64) as u32)
}

fn stroke_alpha<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i32, D::Error> {
    Ok(host_int(deserializer)?.clamp(0, 255) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_dictionary_uses_defaults() {
        assert_eq!(SurfaceOptions::from_json("{}").unwrap(), SurfaceOptions::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let options = SurfaceOptions::from_json(
            r##"{
                "image": "/sdcard/sign.png",
                "requestedWidth": 200,
                "requestedHeight": 100,
                "strokeColor": "#ff0000",
                "strokeWidth": 4.5,
                "strokeAlpha": 128,
                "readOnly": true,
                "backgroundColor": "white"
            }"##,
        )
        .unwrap();

        assert_eq!(
            options,
            SurfaceOptions {
                image: Some("/sdcard/sign.png".into()),
                requested_width: 200,
                requested_height: 100,
                stroke_color: "#ff0000".into(),
                stroke_width: 4.5,
                stroke_alpha: 128,
                read_only: true,
                background_color: Some("white".into()),
            }
        );
    }

    #[test]
    fn test_non_positive_requested_size_derives() {
        let options = SurfaceOptions::from_json(
            r#"{"requestedWidth": -1, "requestedHeight": 0, "strokeColor": "red"}"#,
        )
        .unwrap();
        assert_eq!(options.requested_width, 0);
        assert_eq!(options.requested_height, 0);
        assert_eq!(options.stroke_color, "red");
    }

    #[test]
    fn test_stroke_alpha_accepts_floats_and_clamps() {
        let alpha = |json: &str| SurfaceOptions::from_json(json).unwrap().stroke_alpha;
        assert_eq!(alpha(r#"{"strokeAlpha": 128.0}"#), 128);
        assert_eq!(alpha(r#"{"strokeAlpha": 99.9}"#), 99);
        assert_eq!(alpha(r#"{"strokeAlpha": 400}"#), 255);
        assert_eq!(alpha(r#"{"strokeAlpha": -3}"#), 0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(SurfaceOptions::from_json("{\"strokeWidth\": \"wide\"}").is_err());
    }
}
