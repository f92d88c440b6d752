//! Shapes emitted by the renderer

use serde::Serialize;

/// One of the three finder anchors, named by matrix position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinderAnchor {
    /// Rows and columns `0..finder_modules`
    TopLeft,
    /// Near rows, far columns
    TopRight,
    /// Far rows, near columns
    BottomLeft,
}

impl FinderAnchor {
    /// All anchors in paint order
    pub const ALL: [FinderAnchor; 3] = [
        FinderAnchor::TopLeft,
        FinderAnchor::TopRight,
        FinderAnchor::BottomLeft,
    ];

    /// `(x, y)` offset multiplier applied to the far edge of the matrix
    pub fn multiplier(self) -> (f64, f64) {
        match self {
            FinderAnchor::TopLeft => (0.0, 0.0),
            FinderAnchor::TopRight => (1.0, 0.0),
            FinderAnchor::BottomLeft => (0.0, 1.0),
        }
    }
}

/// Stroke applied to a finder ring outline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    /// Stroke color
    pub color: String,
    /// Stroke width in pixels
    pub width: f64,
}

/// One rounded square of a finder eye
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinderRing {
    /// Anchor this ring belongs to
    pub anchor: FinderAnchor,
    /// Ring index, 0 being the outermost
    pub ring: usize,
    /// Left edge in pixels
    pub x: f64,
    /// Top edge in pixels
    pub y: f64,
    /// Side length in pixels
    pub size: f64,
    /// Corner radius in pixels
    pub corner_radius: f64,
    /// Fill color
    pub fill: String,
    /// Outline, if any
    pub stroke: Option<Stroke>,
}

/// A lone data module drawn as a circle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dot {
    /// Center x in pixels
    pub cx: f64,
    /// Center y in pixels
    pub cy: f64,
    /// Radius in pixels
    pub radius: f64,
    /// Fill color
    pub color: String,
}

/// A vertical run of adjacent data modules drawn as one round-capped line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSegment {
    /// Shared x coordinate of both endpoints
    pub x: f64,
    /// Start y (first member of the run)
    pub y1: f64,
    /// End y (last member of the run)
    pub y2: f64,
    /// Stroke width in pixels; caps are always round
    pub width: f64,
    /// Stroke color
    pub color: String,
}

impl LineSegment {
    /// Whether `(cx, cy)` is one of the module centers this segment spans
    pub fn covers(&self, cx: f64, cy: f64) -> bool {
        cx == self.x && cy >= self.y1 && cy <= self.y2
    }
}

/// A drawable element, in paint order within the output sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Finder eye ring
    FinderMarker(FinderRing),
    /// Isolated data module
    Dot(Dot),
    /// Merged vertical run of data modules
    LineSegment(LineSegment),
}

impl Shape {
    /// Whether this shape is part of a finder eye
    pub fn is_finder(&self) -> bool {
        matches!(self, Shape::FinderMarker(_))
    }

    /// Scale every coordinate and length by `factor`
    pub fn scaled(&self, factor: f64) -> Shape {
        match self {
            Shape::FinderMarker(ring) => Shape::FinderMarker(FinderRing {
                x: ring.x * factor,
                y: ring.y * factor,
                size: ring.size * factor,
                corner_radius: ring.corner_radius * factor,
                stroke: ring.stroke.as_ref().map(|stroke| Stroke {
                    color: stroke.color.clone(),
                    width: stroke.width * factor,
                }),
                ..ring.clone()
            }),
            Shape::Dot(dot) => Shape::Dot(Dot {
                cx: dot.cx * factor,
                cy: dot.cy * factor,
                radius: dot.radius * factor,
                color: dot.color.clone(),
            }),
            Shape::LineSegment(line) => Shape::LineSegment(LineSegment {
                x: line.x * factor,
                y1: line.y1 * factor,
                y2: line.y2 * factor,
                width: line.width * factor,
                color: line.color.clone(),
            }),
        }
    }
}
