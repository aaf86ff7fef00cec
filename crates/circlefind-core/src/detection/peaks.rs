use std::cmp::Ordering;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::accumulator::HoughAccumulator;

/// A detected circle. `x` is the column, `y` the row of the centre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleDetection {
    pub x: usize,
    pub y: usize,
    pub radius: u32,
    /// Vote strength at the peak.
    pub score: f32,
}

/// Parameters for turning an accumulator into detections.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakParams {
    /// Peaks below `threshold_factor * max_vote` are discarded.
    pub threshold_factor: f32,
    pub min_xdistance: u32,
    pub min_ydistance: u32,
    /// Stop after this many accepted detections.
    pub max_peaks: Option<usize>,
}

/// Extract detections from the accumulator, strongest first.
///
/// An accumulator whose maximum is zero yields no detections.
pub fn extract_peaks(acc: &HoughAccumulator, params: &PeakParams) -> Vec<CircleDetection> {
    let max = acc.max_vote();
    if max <= 0.0 {
        return Vec::new();
    }

    let threshold = params.threshold_factor * max;
    let mut candidates = local_maxima(acc, threshold);
    candidates.sort_by(detection_order);
    suppress_close_detections(&candidates, params)
}

/// Total order used to rank candidates: score descending, then radius,
/// row and column ascending.
pub fn detection_order(a: &CircleDetection, b: &CircleDetection) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.radius.cmp(&b.radius))
        .then(a.y.cmp(&b.y))
        .then(a.x.cmp(&b.x))
}

/// Greedy non-maximum suppression over candidates already in rank order.
///
/// A candidate is dropped when some accepted detection lies within
/// `min_xdistance` along x and within `min_ydistance` along y.
pub fn suppress_close_detections(
    ranked: &[CircleDetection],
    params: &PeakParams,
) -> Vec<CircleDetection> {
    let min_dx = params.min_xdistance as usize;
    let min_dy = params.min_ydistance as usize;
    let mut accepted: Vec<CircleDetection> = Vec::new();

    for candidate in ranked {
        if params.max_peaks.is_some_and(|n| accepted.len() >= n) {
            break;
        }
        let too_close = accepted
            .iter()
            .any(|a| a.x.abs_diff(candidate.x) <= min_dx && a.y.abs_diff(candidate.y) <= min_dy);
        if !too_close {
            accepted.push(*candidate);
        }
    }

    accepted
}

/// Positions that are at least as strong as their 8 neighbours in the same
/// radius plane and reach `threshold`.
fn local_maxima(acc: &HoughAccumulator, threshold: f32) -> Vec<CircleDetection> {
    acc.planes()
        .par_iter()
        .zip(acc.radii().par_iter())
        .map(|(plane, &radius)| plane_maxima(plane, radius, threshold))
        .collect::<Vec<_>>()
        .concat()
}

fn plane_maxima(plane: &Array2<f32>, radius: u32, threshold: f32) -> Vec<CircleDetection> {
    let (h, w) = plane.dim();
    let mut found = Vec::new();

    for ((row, col), &v) in plane.indexed_iter() {
        if v <= 0.0 || v < threshold {
            continue;
        }
        if is_local_max(plane, row, col, h, w) {
            found.push(CircleDetection {
                x: col,
                y: row,
                radius,
                score: v,
            });
        }
    }

    found
}

fn is_local_max(plane: &Array2<f32>, row: usize, col: usize, h: usize, w: usize) -> bool {
    let v = plane[[row, col]];
    for nr in row.saturating_sub(1)..=(row + 1).min(h - 1) {
        for nc in col.saturating_sub(1)..=(col + 1).min(w - 1) {
            if plane[[nr, nc]] > v {
                return false;
            }
        }
    }
    true
}
