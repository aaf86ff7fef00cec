use tracing::debug;

use crate::error::Result;

use super::accumulator::HoughAccumulator;
use super::config::DetectionConfig;
use super::edges::EdgeMap;
use super::peaks::{extract_peaks, CircleDetection, PeakParams};
use super::radius::RadiusRange;

/// Finds circles in an edge map.
pub trait CircleTransform: Send + Sync {
    /// Detections ordered strongest first. An empty result is not an error.
    fn find_circles(&self, edges: &EdgeMap) -> Vec<CircleDetection>;
}

/// Multi-radius Hough circle search with greedy peak suppression.
#[derive(Clone, Debug)]
pub struct HoughCircleTransform {
    pub radii: RadiusRange,
    pub peaks: PeakParams,
    pub normalize: bool,
}

impl HoughCircleTransform {
    pub fn new(radii: RadiusRange, peaks: PeakParams) -> Self {
        Self {
            radii,
            peaks,
            normalize: true,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            radii: config.radius_range()?,
            peaks: config.peak_params(),
            normalize: config.normalize_votes,
        })
    }

    pub fn accumulate(&self, edges: &EdgeMap) -> HoughAccumulator {
        HoughAccumulator::compute(edges, &self.radii, self.normalize)
    }
}

impl CircleTransform for HoughCircleTransform {
    fn find_circles(&self, edges: &EdgeMap) -> Vec<CircleDetection> {
        // No edges means an all-zero accumulator; skip the voting entirely.
        if edges.is_blank() {
            debug!("Edge map is blank, no circles");
            return Vec::new();
        }

        let acc = self.accumulate(edges);
        let detections = extract_peaks(&acc, &self.peaks);
        debug!(
            radii = acc.radii().len(),
            max_vote = acc.max_vote(),
            detections = detections.len(),
            "Hough search complete"
        );
        detections
    }
}
