//! Drawing backends for rendered graphics
//!
//! The renderer stops at an ordered shape list. These writers turn a
//! [`QrGraphic`] into an SVG document, a raster image, or a JSON dump of the
//! shapes for downstream tooling.

#[cfg(feature = "raster")]
#[cfg_attr(docsrs, doc(cfg(feature = "raster")))]
pub mod raster;
pub mod svg;

use crate::error::Result;
use crate::render::QrGraphic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logo plate drawn over the clear zone
#[derive(Debug, Clone, PartialEq)]
pub struct LogoPlate {
    /// Plate fill, `None` for no plate body
    pub color: Option<String>,
    /// Plate corner radius in pixels
    pub corner_radius: f64,
    /// Inset of the logo image inside the plate
    pub padding: f64,
    /// Image reference placed inside the plate (SVG only)
    pub href: Option<String>,
}

/// Supported document formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone SVG document
    Svg,
    /// PNG raster image
    Png,
    /// JSON dump of geometry and shapes
    Json,
}

impl OutputFormat {
    /// Parse a format identifier (case-insensitive) from a string slice.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unsupported output format '{value}', expected 'svg', 'png' or 'json'")
        })
    }
}

/// Pretty-printed JSON with geometry and the ordered shapes.
pub fn to_json(graphic: &QrGraphic) -> Result<String> {
    Ok(serde_json::to_string_pretty(graphic)?)
}

/// Compact decimal formatting for coordinates: at most three decimals, no trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Renderer, RenderStyle};

    #[test]
    fn test_format_parse() {
        assert_eq!(OutputFormat::parse("SVG"), Some(OutputFormat::Svg));
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert!("gif".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(3.25), "3.25");
        assert_eq!(format_number(500.0 / 21.0), "23.81");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn test_json_lists_shapes_in_order() {
        let graphic = Renderer::with_style(RenderStyle::default())
            .render_graphic("hello", 500.0, 100.0)
            .unwrap();
        let json = to_json(&graphic).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let shapes = value["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), graphic.shapes.len());
        assert_eq!(shapes[0]["kind"], "finder_marker");
        assert_eq!(shapes[0]["anchor"], "top_left");
        assert_eq!(value["geometry"]["matrix_side"], 21);
    }
}
