//! Matrix-to-shape rendering
//!
//! A render runs in fixed stages, each a pure function producing a fresh
//! value for the next: geometry, finder eyes, extracted coordinates,
//! column groups, clusters and finally the ordered shape list.
//!
//! Module rows map onto the x axis and columns onto the y axis. The three
//! finder footprints are symmetric under that transposition, so the eyes
//! still land on the modules they replace.

pub mod cluster;
pub mod dots;
pub mod finder;
mod geometry;
pub mod shape;
mod style;

pub use geometry::Geometry;
pub use shape::{Dot, FinderAnchor, FinderRing, LineSegment, Shape, Stroke};
pub use style::RenderStyle;

use crate::error::Result;
use crate::qr::{Matrix, MatrixSource, QrcodeSource};
use cluster::Adjacency;
use serde::Serialize;
use tracing::{debug, warn};

/// A rendered graphic ready for a drawing backend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QrGraphic {
    /// Width/height of the shape area in pixels
    pub output_size: f64,
    /// Side of the logo the clear zone was sized for
    pub logo_size: f64,
    /// Geometry the shapes were computed with
    pub geometry: Geometry,
    /// Finder rings, then dots, then line segments
    pub shapes: Vec<Shape>,
}

impl QrGraphic {
    /// Finder ring shapes
    pub fn finder_rings(&self) -> impl Iterator<Item = &FinderRing> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::FinderMarker(ring) => Some(ring),
            _ => None,
        })
    }

    /// Isolated dot shapes
    pub fn dots(&self) -> impl Iterator<Item = &Dot> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::Dot(dot) => Some(dot),
            _ => None,
        })
    }

    /// Merged line segment shapes
    pub fn line_segments(&self) -> impl Iterator<Item = &LineSegment> {
        self.shapes.iter().filter_map(|shape| match shape {
            Shape::LineSegment(line) => Some(line),
            _ => None,
        })
    }

    /// Consume the graphic, keeping only the ordered shapes
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }
}

/// Styled QR renderer over a pluggable matrix source
#[derive(Debug, Clone)]
pub struct Renderer<S = QrcodeSource> {
    source: S,
    style: RenderStyle,
}

impl Renderer<QrcodeSource> {
    /// Renderer using the `qrcode` encoder and the default style
    pub fn new() -> Self {
        Self::with_source(QrcodeSource::new(), RenderStyle::default())
    }

    /// Renderer using the `qrcode` encoder and a custom style
    pub fn with_style(style: RenderStyle) -> Self {
        Self::with_source(QrcodeSource::new(), style)
    }
}

impl Default for Renderer<QrcodeSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MatrixSource> Renderer<S> {
    /// Renderer over an arbitrary matrix source
    pub fn with_source(source: S, style: RenderStyle) -> Self {
        Self { source, style }
    }

    /// Style applied to every render
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Encode `payload` and return the ordered shape sequence
    pub fn render(&self, payload: &str, output_size: f64, logo_size: f64) -> Result<Vec<Shape>> {
        self.render_graphic(payload, output_size, logo_size)
            .map(QrGraphic::into_shapes)
    }

    /// Encode `payload` and return shapes together with their geometry
    pub fn render_graphic(
        &self,
        payload: &str,
        output_size: f64,
        logo_size: f64,
    ) -> Result<QrGraphic> {
        let matrix = self.source.generate_matrix(payload, self.style.ec_level)?;
        self.render_matrix(&matrix, output_size, logo_size)
    }

    /// Style an already encoded matrix
    pub fn render_matrix(
        &self,
        matrix: &Matrix,
        output_size: f64,
        logo_size: f64,
    ) -> Result<QrGraphic> {
        self.style.validate()?;
        let style = &self.style;
        let geometry = Geometry::compute(output_size, matrix.side(), logo_size, style)?;

        if geometry.is_oversized_clear_zone() {
            warn!(
                clear_modules = geometry.clear_modules,
                matrix_side = geometry.matrix_side,
                logo_size,
                "Clear zone covers the whole matrix; no data modules will be drawn"
            );
        }

        let finders = finder::finder_shapes(&geometry, style);
        let coords = dots::extract(matrix, &geometry);
        let groups = cluster::group_by_column(&coords);
        let clustering = cluster::cluster(&groups, Adjacency::for_geometry(&geometry, style));
        let dot_shapes = clustering.dot_shapes(geometry.cell_size, style);
        let line_shapes = clustering.line_shapes(geometry.cell_size, style);

        debug!(
            matrix_side = geometry.matrix_side,
            cell_size = geometry.cell_size,
            clear_modules = geometry.clear_modules,
            data_modules = coords.len(),
            dots = dot_shapes.len(),
            lines = line_shapes.len(),
            "Rendered QR shapes"
        );

        let shapes = finders
            .into_iter()
            .chain(dot_shapes)
            .chain(line_shapes)
            .collect();

        Ok(QrGraphic {
            output_size,
            logo_size,
            geometry,
            shapes,
        })
    }
}
