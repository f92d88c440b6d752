//! Rounded finder "eyes" drawn in place of the square position markers

use crate::render::shape::{FinderAnchor, FinderRing, Shape, Stroke};
use crate::render::{Geometry, RenderStyle};

/// Number of nested rings per eye
pub const RINGS_PER_EYE: usize = 3;

/// Shapes for all three eyes, anchor-major and outer ring first.
pub fn finder_shapes(geometry: &Geometry, style: &RenderStyle) -> Vec<Shape> {
    FinderAnchor::ALL
        .iter()
        .flat_map(|&anchor| eye(anchor, geometry, style))
        .map(Shape::FinderMarker)
        .collect()
}

/// The three nested rings of a single eye.
pub fn eye(anchor: FinderAnchor, geometry: &Geometry, style: &RenderStyle) -> Vec<FinderRing> {
    let cell = geometry.cell_size;
    let modules = geometry.finder_modules as f64;
    let far_edge = (geometry.matrix_side as f64 - modules) * cell;
    let (mx, my) = anchor.multiplier();
    // Multipliers apply transposed since module rows map onto the x axis
    let x_offset = far_edge * my;
    let y_offset = far_edge * mx;
    let stroke_width = style.finder_stroke_width;

    (0..RINGS_PER_EYE)
        .map(|ring| {
            let size = cell * (modules - 2.0 * ring as f64);
            let inset = cell * ring as f64;

            if ring == 0 {
                let side = size - stroke_width;
                FinderRing {
                    anchor,
                    ring,
                    x: x_offset + inset + stroke_width / 2.0,
                    y: y_offset + inset + stroke_width / 2.0,
                    size: side,
                    corner_radius: side * style.corner_radius_ratio,
                    fill: style.edge_color.clone(),
                    stroke: Some(Stroke {
                        color: style.dot_color.clone(),
                        width: stroke_width,
                    }),
                }
            } else {
                let fill = if ring == RINGS_PER_EYE - 1 {
                    style.dot_color.clone()
                } else {
                    style.edge_color.clone()
                };
                FinderRing {
                    anchor,
                    ring,
                    x: x_offset + inset,
                    y: y_offset + inset,
                    size,
                    corner_radius: size * style.corner_radius_ratio,
                    fill,
                    stroke: None,
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        // 21 modules at 10px each
        Geometry::compute(210.0, 21, 0.0, &RenderStyle::default()).unwrap()
    }

    #[test]
    fn test_nine_rings() {
        let shapes = finder_shapes(&geometry(), &RenderStyle::default());
        assert_eq!(shapes.len(), 9);
        assert!(shapes.iter().all(Shape::is_finder));
    }

    #[test]
    fn test_top_left_rings() {
        let style = RenderStyle::default();
        let rings = eye(FinderAnchor::TopLeft, &geometry(), &style);

        let outer = &rings[0];
        assert_eq!(outer.x, 3.25);
        assert_eq!(outer.y, 3.25);
        assert_eq!(outer.size, 63.5);
        assert_eq!(outer.corner_radius, 63.5 * 0.4);
        assert_eq!(outer.fill, "transparent");
        assert_eq!(outer.stroke.as_ref().map(|s| s.width), Some(6.5));

        let middle = &rings[1];
        assert_eq!((middle.x, middle.y, middle.size), (10.0, 10.0, 50.0));
        assert_eq!(middle.corner_radius, 50.0 * 0.4);
        assert_eq!(middle.fill, "transparent");
        assert!(middle.stroke.is_none());

        let inner = &rings[2];
        assert_eq!((inner.x, inner.y, inner.size), (20.0, 20.0, 30.0));
        assert_eq!(inner.fill, "#000");
        assert!(inner.stroke.is_none());
    }

    #[test]
    fn test_mirrored_anchors() {
        let style = RenderStyle::default();
        let g = geometry();

        let top_right = eye(FinderAnchor::TopRight, &g, &style);
        assert_eq!((top_right[2].x, top_right[2].y), (20.0, 160.0));

        let bottom_left = eye(FinderAnchor::BottomLeft, &g, &style);
        assert_eq!((bottom_left[2].x, bottom_left[2].y), (160.0, 20.0));
    }
}
