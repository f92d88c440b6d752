//! Render style parameters

use crate::error::{Error, Result};
use crate::qr::EcLevel;
use serde::{Deserialize, Serialize};

/// Visual constants applied by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Fill/stroke color for finder eyes, dots and line segments
    pub dot_color: String,

    /// Fill color of the two hollow finder rings
    pub edge_color: String,

    /// Stroke width of the outer finder ring, in output pixels
    pub finder_stroke_width: f64,

    /// Side of each finder footprint, in modules
    pub finder_modules: usize,

    /// Finder corner radius as a fraction of the ring side
    pub corner_radius_ratio: f64,

    /// Slack added to the cell size when deciding whether two dots touch
    pub connecting_margin: f64,

    /// Dot radius is `cell_size / dot_size_modifier`; line width is twice that
    pub dot_size_modifier: f64,

    /// Pixels added around the logo before sizing the clear zone
    pub clear_zone_padding: f64,

    /// Error correction level requested from the matrix source
    pub ec_level: EcLevel,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            dot_color: "#000".to_string(),
            edge_color: "transparent".to_string(),
            finder_stroke_width: 6.5,
            finder_modules: 7,
            corner_radius_ratio: 0.4,
            connecting_margin: 0.1,
            dot_size_modifier: 2.5,
            clear_zone_padding: 25.0,
            ec_level: EcLevel::Q,
        }
    }
}

impl RenderStyle {
    /// Default style drawn in a single custom color
    pub fn with_dot_color(color: impl Into<String>) -> Self {
        Self {
            dot_color: color.into(),
            ..Default::default()
        }
    }

    /// Reject values the geometry cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.finder_modules < 5 {
            return Err(Error::InvalidParameter(format!(
                "finder_modules must be at least 5 to fit three rings, got {}",
                self.finder_modules
            )));
        }
        if !self.finder_stroke_width.is_finite() || self.finder_stroke_width < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "finder_stroke_width must be a non-negative number, got {}",
                self.finder_stroke_width
            )));
        }
        if !(0.0..=0.5).contains(&self.corner_radius_ratio) {
            return Err(Error::InvalidParameter(format!(
                "corner_radius_ratio must lie within 0..=0.5, got {}",
                self.corner_radius_ratio
            )));
        }
        if !self.connecting_margin.is_finite() || self.connecting_margin < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "connecting_margin must be a non-negative number, got {}",
                self.connecting_margin
            )));
        }
        if !self.dot_size_modifier.is_finite() || self.dot_size_modifier <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "dot_size_modifier must be positive, got {}",
                self.dot_size_modifier
            )));
        }
        if !self.clear_zone_padding.is_finite() {
            return Err(Error::InvalidParameter(
                "clear_zone_padding must be finite".to_string(),
            ));
        }
        if self.dot_color.trim().is_empty() || self.edge_color.trim().is_empty() {
            return Err(Error::InvalidParameter("colors must not be empty".to_string()));
        }
        Ok(())
    }

    /// Dot radius for a given cell size
    pub fn dot_radius(&self, cell_size: f64) -> f64 {
        cell_size / self.dot_size_modifier
    }

    /// Line segment stroke width for a given cell size
    pub fn line_width(&self, cell_size: f64) -> f64 {
        cell_size / (self.dot_size_modifier / 2.0)
    }
}
