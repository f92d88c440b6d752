//! Raster backend: shapes are filled and stroked onto a `tiny-skia` pixmap,
//! which is then handed over as an `image` RGBA buffer.

use crate::error::{Error, Result};
use crate::output::LogoPlate;
use crate::render::{FinderRing, QrGraphic, Shape};
use image::{Rgba, RgbaImage};
use tiny_skia::{FillRule, LineCap, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Largest canvas side accepted, in pixels
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Raster document settings
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Card color behind the code; `None` leaves the canvas transparent
    pub background: Option<String>,
    /// Card padding around the shape area
    pub padding: f64,
    /// Card corner radius
    pub corner_radius: f64,
    /// Optional plate over the clear zone; image references are not rasterized
    pub logo: Option<LogoPlate>,
    /// Anti-alias shape edges
    pub anti_alias: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            background: Some("#fff".to_string()),
            padding: 16.0,
            corner_radius: 24.0,
            logo: None,
            anti_alias: true,
        }
    }
}

/// Cubic control point offset approximating a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// Paint a graphic onto a fresh RGBA canvas, shapes in sequence order.
pub fn to_image(graphic: &QrGraphic, options: &RasterOptions) -> Result<RgbaImage> {
    let padding = options.padding.max(0.0);
    let extent = (graphic.output_size + 2.0 * padding).ceil();
    if !(1.0..=MAX_CANVAS_SIDE as f64).contains(&extent) {
        return Err(Error::InvalidParameter(format!(
            "canvas side {extent} is outside 1..={MAX_CANVAS_SIDE} pixels"
        )));
    }
    let side = extent as u32;
    let mut canvas = Canvas::new(side, options.anti_alias)?;

    if let Some(color) = parse_color(options.background.as_deref().unwrap_or("none"))? {
        let full = f64::from(side);
        let card = rounded_rect(0.0, 0.0, full, full, options.corner_radius);
        canvas.fill(card.as_ref(), color);
    }

    for shape in &graphic.shapes {
        paint_shape(&mut canvas, shape, padding)?;
    }

    if let Some(logo) = &options.logo {
        paint_logo(&mut canvas, graphic, padding, logo)?;
    }

    canvas.into_image()
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a few keywords; `Ok(None)` means nothing is painted.
pub fn parse_color(value: &str) -> Result<Option<Rgba<u8>>> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "none" | "transparent" => return Ok(None),
        "black" => return Ok(Some(Rgba([0, 0, 0, 255]))),
        "white" => return Ok(Some(Rgba([255, 255, 255, 255]))),
        _ => {}
    }

    let invalid = || Error::InvalidParameter(format!("Unsupported color '{value}'"));
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    let short = |index: usize| channel(index..index + 1).map(|v| v * 17);

    let rgba = match hex.len() {
        3 => [short(0)?, short(1)?, short(2)?, 255],
        6 => [channel(0..2)?, channel(2..4)?, channel(4..6)?, 255],
        8 => [channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?],
        _ => return Err(invalid()),
    };
    Ok(Some(Rgba(rgba)))
}

fn paint_shape(canvas: &mut Canvas, shape: &Shape, offset: f64) -> Result<()> {
    match shape {
        Shape::FinderMarker(ring) => paint_ring(canvas, ring, offset),
        Shape::Dot(dot) => {
            if let Some(color) = parse_color(&dot.color)? {
                let path = PathBuilder::from_circle(
                    (dot.cx + offset) as f32,
                    (dot.cy + offset) as f32,
                    dot.radius as f32,
                );
                canvas.fill(path.as_ref(), color);
            }
            Ok(())
        }
        Shape::LineSegment(line) => {
            if let Some(color) = parse_color(&line.color)? {
                let x = (line.x + offset) as f32;
                let mut builder = PathBuilder::new();
                builder.move_to(x, (line.y1 + offset) as f32);
                builder.line_to(x, (line.y2 + offset) as f32);
                canvas.stroke(builder.finish().as_ref(), color, line.width, LineCap::Round);
            }
            Ok(())
        }
    }
}

fn paint_ring(canvas: &mut Canvas, ring: &FinderRing, offset: f64) -> Result<()> {
    let path = rounded_rect(
        ring.x + offset,
        ring.y + offset,
        ring.size,
        ring.size,
        ring.corner_radius,
    );

    if let Some(color) = parse_color(&ring.fill)? {
        canvas.fill(path.as_ref(), color);
    }
    if let Some(stroke) = &ring.stroke {
        if let Some(color) = parse_color(&stroke.color)? {
            canvas.stroke(path.as_ref(), color, stroke.width, LineCap::Butt);
        }
    }
    Ok(())
}

fn paint_logo(canvas: &mut Canvas, graphic: &QrGraphic, offset: f64, logo: &LogoPlate) -> Result<()> {
    let side = graphic.logo_size;
    if side <= 0.0 {
        return Ok(());
    }
    if logo.href.is_some() {
        tracing::debug!("Logo image references are only embedded in SVG output");
    }

    if let Some(color) = parse_color(logo.color.as_deref().unwrap_or("none"))? {
        let origin = offset + (graphic.output_size - side) / 2.0;
        let plate = rounded_rect(origin, origin, side, side, logo.corner_radius);
        canvas.fill(plate.as_ref(), color);
    }
    Ok(())
}

/// Closed rounded-rectangle outline; `None` for non-finite input.
fn rounded_rect(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Option<Path> {
    let (x, y, w, h) = (x as f32, y as f32, w as f32, h as f32);
    let r = (radius as f32).clamp(0.0, w.min(h) / 2.0);
    let k = r * (1.0 - KAPPA);
    let (right, bottom) = (x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - k, y, right, y + k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - k, right - k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + k, bottom, x, bottom - k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + k, x + k, y, x + r, y);
    pb.close();
    pb.finish()
}

struct Canvas {
    pixmap: Pixmap,
    anti_alias: bool,
}

impl Canvas {
    fn new(side: u32, anti_alias: bool) -> Result<Self> {
        let pixmap = Pixmap::new(side, side).ok_or_else(|| {
            Error::Image(format!("Failed to allocate a {side}x{side} pixmap"))
        })?;
        Ok(Self { pixmap, anti_alias })
    }

    fn paint(&self, color: Rgba<u8>) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn fill(&mut self, path: Option<&Path>, color: Rgba<u8>) {
        let Some(path) = path else { return };
        let paint = self.paint(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke(&mut self, path: Option<&Path>, color: Rgba<u8>, width: f64, cap: LineCap) {
        let Some(path) = path else { return };
        if width <= 0.0 {
            return;
        }
        let paint = self.paint(color);
        let stroke = Stroke {
            width: width as f32,
            line_cap: cap,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }

    /// Demultiply the pixmap into a straight-alpha RGBA image.
    fn into_image(self) -> Result<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let raw = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, raw)
            .ok_or_else(|| Error::Image("Pixmap size does not match the image buffer".to_string()))
    }
}
