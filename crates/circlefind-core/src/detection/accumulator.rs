use std::collections::BTreeSet;

use ndarray::Array2;
use rayon::prelude::*;

use crate::error::{CircleError, Result};

use super::edges::EdgeMap;
use super::radius::RadiusRange;

/// Per-radius Hough vote planes, each with the extent of the edge map.
#[derive(Clone, Debug)]
pub struct HoughAccumulator {
    radii: Vec<u32>,
    planes: Vec<Array2<f32>>,
}

impl HoughAccumulator {
    /// Vote for circle centres at every radius in `range`.
    ///
    /// Each edge pixel adds one vote to every in-bounds point of the discrete
    /// circle of radius `r` around it. With `normalize`, plane `r` is divided
    /// by the number of points on that circle, so a complete circle scores
    /// about 1.0 whatever its size.
    pub fn compute(edges: &EdgeMap, range: &RadiusRange, normalize: bool) -> Self {
        let (h, w) = edges.data.dim();
        let points = edges.edge_points();
        let radii = range.radii();

        let planes: Vec<Array2<f32>> = radii
            .par_iter()
            .map(|&r| vote_plane(&points, h, w, r, normalize))
            .collect();

        Self { radii, planes }
    }

    /// Build an accumulator from precomputed planes.
    ///
    /// Every plane must have the same shape and there must be one per radius.
    pub fn from_planes(radii: Vec<u32>, planes: Vec<Array2<f32>>) -> Result<Self> {
        if radii.len() != planes.len() {
            return Err(CircleError::InvalidConfig(format!(
                "{} radii but {} accumulator planes",
                radii.len(),
                planes.len()
            )));
        }
        if let Some(first) = planes.first() {
            if planes.iter().any(|p| p.dim() != first.dim()) {
                return Err(CircleError::InvalidConfig(
                    "accumulator planes differ in shape".into(),
                ));
            }
        }
        Ok(Self { radii, planes })
    }

    pub fn radii(&self) -> &[u32] {
        &self.radii
    }

    pub fn planes(&self) -> &[Array2<f32>] {
        &self.planes
    }

    /// `(height, width)` of each plane; `(0, 0)` when there are no planes.
    pub fn dim(&self) -> (usize, usize) {
        self.planes.first().map(|p| p.dim()).unwrap_or((0, 0))
    }

    /// Strongest vote over all radii and positions, 0.0 when empty.
    pub fn max_vote(&self) -> f32 {
        self.planes
            .iter()
            .flat_map(|p| p.iter().copied())
            .fold(0.0f32, f32::max)
    }
}

fn vote_plane(
    points: &[(usize, usize)],
    h: usize,
    w: usize,
    radius: u32,
    normalize: bool,
) -> Array2<f32> {
    let offsets = circle_perimeter(radius);
    let mut plane = Array2::<f32>::zeros((h, w));

    for &(row, col) in points {
        for &(dy, dx) in &offsets {
            let y = row as isize + dy;
            let x = col as isize + dx;
            if y < 0 || x < 0 || y >= h as isize || x >= w as isize {
                continue;
            }
            plane[[y as usize, x as usize]] += 1.0;
        }
    }

    if normalize && !offsets.is_empty() {
        let n = offsets.len() as f32;
        plane.mapv_inplace(|v| v / n);
    }

    plane
}

/// `(dy, dx)` offsets of the Bresenham circle of the given radius.
///
/// Each offset appears once; the order is ascending and stable.
pub fn circle_perimeter(radius: u32) -> Vec<(isize, isize)> {
    let r = radius as isize;
    let mut points = BTreeSet::new();
    let mut x = 0isize;
    let mut y = r;
    let mut d = 3 - 2 * r;

    while y >= x {
        for (a, b) in [(x, y), (y, x)] {
            points.insert((a, b));
            points.insert((a, -b));
            points.insert((-a, b));
            points.insert((-a, -b));
        }
        if d < 0 {
            d += 4 * x + 6;
        } else {
            d += 4 * (x - y) + 10;
            y -= 1;
        }
        x += 1;
    }

    points.into_iter().collect()
}
