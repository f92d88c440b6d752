//! qreye runtime configuration handling

use crate::error::{Error, Result};
#[cfg(feature = "raster")]
use crate::output::raster::RasterOptions;
use crate::output::svg::SvgOptions;
use crate::output::{LogoPlate, OutputFormat};
use crate::qr::EcLevel;
use crate::render::RenderStyle;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QreyeConfig {
    /// Render style overrides
    pub style: StyleOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Output document configuration
    pub output: OutputOptions,
}

impl QreyeConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qreye.toml / qreye.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qreye.toml", "qreye.yaml", "qreye.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qreye");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.style.apply_env_overrides();
        self.logging.apply_env_overrides();
        self.output.apply_env_overrides();
    }

    /// Produce a fully resolved render style.
    pub fn render_style(&self) -> Result<RenderStyle> {
        self.style.to_render_style()
    }
}

/// Style overrides merged on top of `RenderStyle::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Override for the eye/dot/line color
    pub dot_color: Option<String>,
    /// Override for the hollow finder ring fill
    pub edge_color: Option<String>,
    /// Override for the outer finder ring stroke width (pixels)
    pub finder_stroke_width: Option<f64>,
    /// Override for the finder footprint side in modules
    pub finder_modules: Option<usize>,
    /// Override for the finder corner radius ratio
    pub corner_radius_ratio: Option<f64>,
    /// Override for the slack added to the adjacency threshold (pixels)
    pub connecting_margin: Option<f64>,
    /// Override for the dot size divisor
    pub dot_size_modifier: Option<f64>,
    /// Override for the padding around the logo (pixels)
    pub clear_zone_padding: Option<f64>,
    /// Override for the error correction level (L/M/Q/H)
    pub ec_level: Option<String>,
}

impl StyleOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(color) = env::var("QREYE_DOT_COLOR") {
            self.dot_color = Some(color);
        }
        if let Ok(color) = env::var("QREYE_EDGE_COLOR") {
            self.edge_color = Some(color);
        }
        if let Ok(width) = env::var("QREYE_FINDER_STROKE") {
            if let Ok(parsed) = width.parse::<f64>() {
                self.finder_stroke_width = Some(parsed);
            }
        }
        if let Ok(modules) = env::var("QREYE_FINDER_MODULES") {
            if let Ok(parsed) = modules.parse::<usize>() {
                self.finder_modules = Some(parsed);
            }
        }
        if let Ok(margin) = env::var("QREYE_CONNECTING_MARGIN") {
            if let Ok(parsed) = margin.parse::<f64>() {
                self.connecting_margin = Some(parsed);
            }
        }
        if let Ok(level) = env::var("QREYE_EC_LEVEL") {
            self.ec_level = Some(level);
        }
    }

    /// Merge overrides onto the default render style.
    pub fn to_render_style(&self) -> Result<RenderStyle> {
        let mut style = RenderStyle::default();

        if let Some(color) = &self.dot_color {
            style.dot_color = color.clone();
        }
        if let Some(color) = &self.edge_color {
            style.edge_color = color.clone();
        }
        if let Some(width) = self.finder_stroke_width {
            style.finder_stroke_width = width;
        }
        if let Some(modules) = self.finder_modules {
            style.finder_modules = modules;
        }
        if let Some(ratio) = self.corner_radius_ratio {
            style.corner_radius_ratio = ratio;
        }
        if let Some(margin) = self.connecting_margin {
            style.connecting_margin = margin;
        }
        if let Some(modifier) = self.dot_size_modifier {
            style.dot_size_modifier = modifier;
        }
        if let Some(padding) = self.clear_zone_padding {
            style.clear_zone_padding = padding;
        }
        if let Some(level) = &self.ec_level {
            style.ec_level = EcLevel::parse(level).ok_or_else(|| {
                Error::Config(format!(
                    "Unknown error correction level '{}'. Use L, M, Q or H",
                    level
                ))
            })?;
        }

        style.validate()?;
        Ok(style)
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QREYE_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QREYE_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QREYE_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QREYE_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QREYE_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Output document settings: canvas, background card and logo plate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Default output format
    pub format: OutputFormat,
    /// Shape area width/height in pixels
    pub size: f64,
    /// Logo plate side in pixels; also sizes the clear zone
    pub logo_size: f64,
    /// Card color behind the code, `None` for a transparent document
    pub background: Option<String>,
    /// Card padding around the shape area in pixels
    pub padding: f64,
    /// Card corner radius in pixels
    pub corner_radius: f64,
    /// Logo plate color, `None` to leave the clear zone empty
    pub logo_color: Option<String>,
    /// Logo plate corner radius in pixels
    pub logo_corner_radius: f64,
    /// Inset of the logo image inside its plate in pixels
    pub logo_padding: f64,
    /// Logo image reference embedded in SVG output
    pub logo_href: Option<String>,
    /// Anti-alias shape edges when rasterizing
    pub anti_alias: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Svg,
            size: 500.0,
            logo_size: 100.0,
            background: Some("#fff".to_string()),
            padding: 16.0,
            corner_radius: 24.0,
            logo_color: Some("#3049CB".to_string()),
            logo_corner_radius: 24.0,
            logo_padding: 16.0,
            logo_href: None,
            anti_alias: true,
        }
    }
}

impl OutputOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(format) = env::var("QREYE_FORMAT") {
            if let Ok(parsed) = format.parse::<OutputFormat>() {
                self.format = parsed;
            }
        }
        if let Ok(size) = env::var("QREYE_SIZE") {
            if let Ok(parsed) = size.parse::<f64>() {
                self.size = parsed;
            }
        }
        if let Ok(logo) = env::var("QREYE_LOGO_SIZE") {
            if let Ok(parsed) = logo.parse::<f64>() {
                self.logo_size = parsed;
            }
        }
        if let Ok(background) = env::var("QREYE_BACKGROUND") {
            self.background = none_if_disabled(background);
        }
        if let Ok(color) = env::var("QREYE_LOGO_COLOR") {
            self.logo_color = none_if_disabled(color);
        }
        if let Ok(href) = env::var("QREYE_LOGO_HREF") {
            self.logo_href = none_if_disabled(href);
        }
    }
}

impl OutputOptions {
    /// Logo plate settings, if a plate or logo image is configured
    pub fn logo_plate(&self) -> Option<LogoPlate> {
        if self.logo_color.is_none() && self.logo_href.is_none() {
            return None;
        }
        Some(LogoPlate {
            color: self.logo_color.clone(),
            corner_radius: self.logo_corner_radius,
            padding: self.logo_padding,
            href: self.logo_href.clone(),
        })
    }

    /// Settings for the SVG writer
    pub fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            background: self.background.clone(),
            padding: self.padding,
            corner_radius: self.corner_radius,
            logo: self.logo_plate(),
        }
    }

    /// Settings for the raster writer
    #[cfg(feature = "raster")]
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            background: self.background.clone(),
            padding: self.padding,
            corner_radius: self.corner_radius,
            logo: self.logo_plate(),
            anti_alias: self.anti_alias,
        }
    }
}

fn none_if_disabled(value: String) -> Option<String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "off" => None,
        _ => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let dir = env::temp_dir().join(format!("qreye-config-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = QreyeConfig::default();
        assert_eq!(config.output.size, 500.0);
        assert_eq!(config.output.logo_size, 100.0);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.render_style().unwrap(), RenderStyle::default());
    }

    #[test]
    fn test_from_toml() {
        let path = write_temp(
            "qreye.toml",
            r##"
[style]
dot_color = "#3049cb"
ec_level = "h"

[output]
size = 256.0
background = "#eee"
"##,
        );
        let config = QreyeConfig::from_file(&path).unwrap();
        let style = config.render_style().unwrap();
        assert_eq!(style.dot_color, "#3049cb");
        assert_eq!(style.ec_level, EcLevel::H);
        assert_eq!(config.output.size, 256.0);
        assert_eq!(config.output.background.as_deref(), Some("#eee"));
        assert_eq!(config.output.logo_size, 100.0);
    }

    #[test]
    fn test_from_yaml() {
        let path = write_temp(
            "qreye.yaml",
            "logging:\n  level: debug\n  rotation: daily\noutput:\n  format: png\n",
        );
        let config = QreyeConfig::from_file(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
        assert_eq!(config.output.format, OutputFormat::Png);
    }

    #[test]
    fn test_unsupported_extension() {
        let path = write_temp("qreye.ini", "size = 1");
        assert!(matches!(
            QreyeConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_finder_modules_from_toml() {
        let path = write_temp("finder.toml", "[style]\nfinder_modules = 9\n");
        let config = QreyeConfig::from_file(&path).unwrap();
        assert_eq!(config.style.finder_modules, Some(9));
        assert_eq!(config.render_style().unwrap().finder_modules, 9);
    }

    #[test]
    fn test_finder_modules_too_small() {
        let options = StyleOptions {
            finder_modules: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            options.to_render_style(),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_bad_ec_level() {
        let options = StyleOptions {
            ec_level: Some("Z".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            options.to_render_style(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_logo_plate_follows_options() {
        let mut output = OutputOptions::default();
        let svg = output.svg_options();
        assert_eq!(svg.padding, 16.0);
        assert_eq!(
            svg.logo.and_then(|logo| logo.color).as_deref(),
            Some("#3049CB")
        );

        output.logo_color = None;
        assert!(output.logo_plate().is_none());
    }

    #[test]
    fn test_none_if_disabled() {
        assert_eq!(none_if_disabled("none".to_string()), None);
        assert_eq!(none_if_disabled("#fff".to_string()), Some("#fff".to_string()));
    }
}
