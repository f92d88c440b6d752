//! Per-render geometry derived from output size, matrix side and logo size

use crate::error::{Error, Result};
use crate::render::RenderStyle;
use serde::Serialize;

/// Pixel and module constants shared by every render stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    /// Output width/height in pixels
    pub output_size: f64,
    /// Matrix side in modules
    pub matrix_side: usize,
    /// Pixel width/height of one module
    pub cell_size: f64,
    /// Finder footprint side in modules
    pub finder_modules: usize,
    /// Clear zone side in modules
    pub clear_modules: usize,
    /// Lower (exclusive) clear zone bound, in modules
    pub middle_start: f64,
    /// Upper (exclusive) clear zone bound, in modules
    pub middle_end: f64,
}

impl Geometry {
    /// Compute geometry for one render.
    ///
    /// The clear zone is not clamped to the matrix: an oversized zone simply
    /// excludes every data module it covers.
    pub fn compute(
        output_size: f64,
        matrix_side: usize,
        logo_size: f64,
        style: &RenderStyle,
    ) -> Result<Self> {
        if !output_size.is_finite() || output_size <= 0.0 {
            return Err(Error::DegenerateGeometry(format!(
                "output size must be a positive number, got {output_size}"
            )));
        }
        if matrix_side == 0 {
            return Err(Error::DegenerateGeometry(
                "matrix has no modules".to_string(),
            ));
        }
        if !logo_size.is_finite() || logo_size < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "logo size must be a non-negative number, got {logo_size}"
            )));
        }

        let side = matrix_side as f64;
        let cell_size = output_size / side;
        let clear_modules = ((logo_size + style.clear_zone_padding) / cell_size)
            .floor()
            .max(0.0) as usize;
        let half_clear = clear_modules as f64 / 2.0;

        Ok(Self {
            output_size,
            matrix_side,
            cell_size,
            finder_modules: style.finder_modules,
            clear_modules,
            middle_start: side / 2.0 - half_clear,
            middle_end: side / 2.0 + half_clear - 1.0,
        })
    }

    /// Whether `(row, col)` lies in one of the three finder footprints
    pub fn in_finder_region(&self, row: usize, col: usize) -> bool {
        let m = self.finder_modules;
        let n = self.matrix_side;
        // `index > n - (m + 1)` without underflow on tiny matrices
        let far_row = row + m >= n;
        let far_col = col + m >= n;

        (row < m && col < m) || (far_row && col < m) || (row < m && far_col)
    }

    /// Whether `(row, col)` lies strictly inside the clear zone on both axes
    pub fn in_clear_zone(&self, row: usize, col: usize) -> bool {
        let inside = |index: usize| {
            let index = index as f64;
            index > self.middle_start && index < self.middle_end
        };
        inside(row) && inside(col)
    }

    /// Whether the clear zone spans at least the whole matrix
    pub fn is_oversized_clear_zone(&self) -> bool {
        self.clear_modules >= self.matrix_side
    }

    /// Pixel-space center of the module at `(row, col)` as `(cx, cy)`
    pub fn module_center(&self, row: usize, col: usize) -> (f64, f64) {
        let half = self.cell_size / 2.0;
        (
            row as f64 * self.cell_size + half,
            col as f64 * self.cell_size + half,
        )
    }

    /// Maximum center distance at which two dots in a column are merged
    pub fn adjacency_threshold(&self, style: &RenderStyle) -> f64 {
        self.cell_size + style.connecting_margin
    }
}
