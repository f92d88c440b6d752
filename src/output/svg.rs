//! SVG document writer

use crate::output::{LogoPlate, format_number as num};
use crate::render::{FinderRing, QrGraphic, Shape};
use std::fmt::Write as _;

/// Document-level SVG settings
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Card color behind the code; `None` leaves the document transparent
    pub background: Option<String>,
    /// Card padding around the shape area
    pub padding: f64,
    /// Card corner radius
    pub corner_radius: f64,
    /// Optional plate over the clear zone
    pub logo: Option<LogoPlate>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            background: Some("#fff".to_string()),
            padding: 16.0,
            corner_radius: 24.0,
            logo: None,
        }
    }
}

impl SvgOptions {
    /// Bare shapes: no card, no padding, no logo plate
    pub fn bare() -> Self {
        Self {
            background: None,
            padding: 0.0,
            corner_radius: 0.0,
            logo: None,
        }
    }
}

/// Serialize a graphic into a standalone SVG document.
pub fn to_svg(graphic: &QrGraphic, options: &SvgOptions) -> String {
    let mut output = String::new();
    let padding = options.padding.max(0.0);
    let total = num(graphic.output_size + 2.0 * padding);

    let _ = writeln!(
        &mut output,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total}" height="{total}" viewBox="0 0 {total} {total}">"#
    );

    if let Some(background) = &options.background {
        let _ = writeln!(
            &mut output,
            r#"  <rect width="{total}" height="{total}" rx="{r}" ry="{r}" fill="{fill}"/>"#,
            r = num(options.corner_radius),
            fill = escape(background),
        );
    }

    let _ = writeln!(
        &mut output,
        r#"  <g transform="translate({p} {p})">"#,
        p = num(padding)
    );
    for shape in &graphic.shapes {
        write_shape(&mut output, shape);
    }
    let _ = writeln!(&mut output, "  </g>");

    if let Some(logo) = &options.logo {
        write_logo(&mut output, graphic, padding, logo);
    }

    let _ = writeln!(&mut output, "</svg>");
    output
}

fn write_shape(output: &mut String, shape: &Shape) {
    match shape {
        Shape::FinderMarker(ring) => write_ring(output, ring),
        Shape::Dot(dot) => {
            let _ = writeln!(
                output,
                r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                num(dot.cx),
                num(dot.cy),
                num(dot.radius),
                escape(&dot.color),
            );
        }
        Shape::LineSegment(line) => {
            let _ = writeln!(
                output,
                r#"    <line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
                num(line.y1),
                num(line.y2),
                escape(&line.color),
                num(line.width),
                x = num(line.x),
            );
        }
    }
}

fn write_ring(output: &mut String, ring: &FinderRing) {
    let (stroke, stroke_width) = match &ring.stroke {
        Some(stroke) => (escape(&stroke.color), num(stroke.width)),
        None => ("none".to_string(), "0".to_string()),
    };
    let _ = writeln!(
        output,
        r#"    <rect x="{}" y="{}" width="{size}" height="{size}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        num(ring.x),
        num(ring.y),
        escape(&ring.fill),
        stroke,
        stroke_width,
        size = num(ring.size),
        r = num(ring.corner_radius),
    );
}

fn write_logo(output: &mut String, graphic: &QrGraphic, padding: f64, logo: &LogoPlate) {
    let side = graphic.logo_size;
    if side <= 0.0 {
        return;
    }
    let origin = padding + (graphic.output_size - side) / 2.0;

    if let Some(color) = &logo.color {
        let _ = writeln!(
            output,
            r#"  <rect x="{o}" y="{o}" width="{s}" height="{s}" rx="{r}" ry="{r}" fill="{}"/>"#,
            escape(color),
            o = num(origin),
            s = num(side),
            r = num(logo.corner_radius),
        );
    }

    if let Some(href) = &logo.href {
        let inset = logo.padding.clamp(0.0, side / 2.0);
        let _ = writeln!(
            output,
            r#"  <image href="{}" x="{o}" y="{o}" width="{s}" height="{s}" preserveAspectRatio="xMidYMid meet"/>"#,
            escape(href),
            o = num(origin + inset),
            s = num(side - 2.0 * inset),
        );
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;

    fn hello() -> QrGraphic {
        Renderer::new().render_graphic("hello", 500.0, 100.0).unwrap()
    }

    #[test]
    fn test_document_structure() {
        let graphic = hello();
        let svg = to_svg(&graphic, &SvgOptions::default());

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="532""#));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"<g transform="translate(16 16)">"#));
        assert!(svg.contains(r##"fill="#fff""##));

        let elements = svg.matches("<rect x=").count()
            + svg.matches("<circle ").count()
            + svg.matches("<line ").count();
        assert_eq!(elements, graphic.shapes.len());
        assert_eq!(svg.matches("stroke-linecap=\"round\"").count(), graphic.line_segments().count());
    }

    #[test]
    fn test_bare_document() {
        let svg = to_svg(&hello(), &SvgOptions::bare());
        assert!(svg.contains(r#"width="500""#));
        assert!(!svg.contains(r##"fill="#fff""##));
        assert!(svg.contains(r#"<g transform="translate(0 0)">"#));
    }

    #[test]
    fn test_logo_plate_centered() {
        let options = SvgOptions {
            logo: Some(LogoPlate {
                color: Some("#3049CB".to_string()),
                corner_radius: 24.0,
                padding: 16.0,
                href: Some("logo.svg?a=1&b=2".to_string()),
            }),
            ..Default::default()
        };
        let svg = to_svg(&hello(), &options);

        assert!(svg.contains(
            r##"<rect x="216" y="216" width="100" height="100" rx="24" ry="24" fill="#3049CB"/>"##
        ));
        assert!(svg.contains(r#"href="logo.svg?a=1&amp;b=2" x="232" y="232" width="68" height="68""#));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>"c"&'d'"#), "a&lt;b&gt;&quot;c&quot;&amp;&apos;d&apos;");
    }
}
