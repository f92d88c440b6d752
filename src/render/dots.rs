//! Extraction of data-module centers eligible for dot/line rendering

use crate::qr::Matrix;
use crate::render::Geometry;
use serde::Serialize;

/// Pixel-space center of one filled data module
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    /// Source module row
    pub row: usize,
    /// Source module column
    pub col: usize,
    /// Center x, derived from the row
    pub cx: f64,
    /// Center y, derived from the column
    pub cy: f64,
}

/// Centers of every filled module outside the finder footprints and the clear zone,
/// in row-major order.
pub fn extract(matrix: &Matrix, geometry: &Geometry) -> Vec<Coordinate> {
    matrix
        .filled()
        .filter(|&(row, col)| !geometry.in_finder_region(row, col))
        .filter(|&(row, col)| !geometry.in_clear_zone(row, col))
        .map(|(row, col)| {
            let (cx, cy) = geometry.module_center(row, col);
            Coordinate { row, col, cx, cy }
        })
        .collect()
}
