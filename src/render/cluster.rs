//! Grouping of same-column data modules into dots and rounded line segments
//!
//! Only vertical neighbours (same `cx`) are ever merged. Modules touching
//! across rows or diagonally stay separate dots, which gives the graphic its
//! vertical-bar look.

use crate::render::dots::Coordinate;
use crate::render::shape::{Dot, LineSegment, Shape};
use crate::render::{Geometry, RenderStyle};
use std::collections::BTreeMap;

/// Symmetric, inclusive closeness test between two centers of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    threshold: f64,
}

impl Adjacency {
    /// Adjacency with an explicit pixel threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// `cell_size + connecting_margin`
    pub fn for_geometry(geometry: &Geometry, style: &RenderStyle) -> Self {
        Self::new(geometry.adjacency_threshold(style))
    }

    /// Threshold in pixels
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether two distinct centers are within the threshold. A center never neighbours itself.
    pub fn is_adjacent(&self, cy: f64, other: f64) -> bool {
        cy != other && (cy - other).abs() <= self.threshold
    }
}

/// All `cy` values sharing one `cx`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    /// Module row the group was built from
    pub row: usize,
    /// Shared x coordinate
    pub cx: f64,
    /// Member y coordinates in extraction order
    pub cys: Vec<f64>,
}

impl ColumnGroup {
    /// Members with no neighbour in this group
    pub fn isolated(&self, adjacency: Adjacency) -> Vec<f64> {
        self.cys
            .iter()
            .copied()
            .filter(|&cy| !self.has_neighbour(cy, adjacency))
            .collect()
    }

    /// Maximal runs of mutually reachable neighbours, ascending
    pub fn runs(&self, adjacency: Adjacency) -> Vec<Vec<f64>> {
        if self.cys.len() < 2 {
            return Vec::new();
        }

        let mut connected: Vec<f64> = self
            .cys
            .iter()
            .copied()
            .filter(|&cy| self.has_neighbour(cy, adjacency))
            .collect();
        connected.sort_by(f64::total_cmp);

        connected
            .into_iter()
            .fold(Vec::<Vec<f64>>::new(), |mut runs, cy| {
                match runs
                    .iter_mut()
                    .find(|run| run.iter().any(|&other| adjacency.is_adjacent(cy, other)))
                {
                    Some(run) => run.push(cy),
                    None => runs.push(vec![cy]),
                }
                runs
            })
    }

    fn has_neighbour(&self, cy: f64, adjacency: Adjacency) -> bool {
        self.cys
            .iter()
            .any(|&other| adjacency.is_adjacent(cy, other))
    }
}

/// A run of at least two adjacent centers in one column
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Shared x coordinate
    pub cx: f64,
    /// Lowest member
    pub first: f64,
    /// Highest member
    pub last: f64,
    /// Number of merged modules
    pub len: usize,
}

/// Output of the clusterer: lone centers and merged runs, both in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clustering {
    /// `(cx, cy)` of every isolated center
    pub isolated: Vec<(f64, f64)>,
    /// Every merged run
    pub runs: Vec<Run>,
}

impl Clustering {
    /// One dot per isolated center
    pub fn dot_shapes(&self, cell_size: f64, style: &RenderStyle) -> Vec<Shape> {
        let radius = style.dot_radius(cell_size);
        self.isolated
            .iter()
            .map(|&(cx, cy)| {
                Shape::Dot(Dot {
                    cx,
                    cy,
                    radius,
                    color: style.dot_color.clone(),
                })
            })
            .collect()
    }

    /// One vertical round-capped line per run
    pub fn line_shapes(&self, cell_size: f64, style: &RenderStyle) -> Vec<Shape> {
        let width = style.line_width(cell_size);
        self.runs
            .iter()
            .map(|run| {
                Shape::LineSegment(LineSegment {
                    x: run.cx,
                    y1: run.first,
                    y2: run.last,
                    width,
                    color: style.dot_color.clone(),
                })
            })
            .collect()
    }
}

/// Group coordinates by column, ordered by source row.
pub fn group_by_column(coords: &[Coordinate]) -> Vec<ColumnGroup> {
    coords
        .iter()
        .fold(BTreeMap::<usize, ColumnGroup>::new(), |mut groups, coord| {
            groups
                .entry(coord.row)
                .or_insert_with(|| ColumnGroup {
                    row: coord.row,
                    cx: coord.cx,
                    cys: Vec::new(),
                })
                .cys
                .push(coord.cy);
            groups
        })
        .into_values()
        .collect()
}

/// Split every column into isolated centers and merged runs.
pub fn cluster(groups: &[ColumnGroup], adjacency: Adjacency) -> Clustering {
    let isolated = groups
        .iter()
        .flat_map(|group| {
            group
                .isolated(adjacency)
                .into_iter()
                .map(move |cy| (group.cx, cy))
        })
        .collect();

    let runs = groups
        .iter()
        .flat_map(|group| {
            group.runs(adjacency).into_iter().map(move |members| Run {
                cx: group.cx,
                first: members[0],
                last: members[members.len() - 1],
                len: members.len(),
            })
        })
        .collect();

    Clustering { isolated, runs }
}
