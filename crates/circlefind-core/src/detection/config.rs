use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLUR_KSIZE, DEFAULT_CANNY_THRESHOLD1, DEFAULT_CANNY_THRESHOLD2,
    DEFAULT_HOUGH_THRESHOLD_FACTOR, DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS,
    DEFAULT_MIN_XDISTANCE, DEFAULT_MIN_YDISTANCE, DEFAULT_RADIUS_STEP,
};
use crate::error::{CircleError, Result};

use super::peaks::PeakParams;
use super::radius::RadiusRange;

/// Parameters of the per-image detection pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Requested Gaussian kernel size; even values are bumped to the next odd one.
    #[serde(default = "default_blur_ksize")]
    pub blur_ksize: u32,
    /// Canny low hysteresis threshold.
    #[serde(default = "default_canny_threshold1")]
    pub canny_threshold1: f32,
    /// Canny high hysteresis threshold.
    #[serde(default = "default_canny_threshold2")]
    pub canny_threshold2: f32,
    #[serde(default = "default_min_radius")]
    pub min_radius: u32,
    /// Exclusive upper bound of the radius sweep.
    #[serde(default = "default_max_radius")]
    pub max_radius: u32,
    #[serde(default = "default_radius_step")]
    pub radius_step: u32,
    /// Fraction of the strongest vote a peak must reach, in (0, 1].
    #[serde(default = "default_hough_threshold_factor")]
    pub hough_threshold_factor: f32,
    #[serde(default = "default_min_xdistance")]
    pub min_xdistance: u32,
    #[serde(default = "default_min_ydistance")]
    pub min_ydistance: u32,
    /// Upper bound on detections per image. `None` keeps every peak.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_circles: Option<usize>,
    /// Divide each radius plane by its perimeter length before peak search.
    #[serde(default = "default_normalize_votes")]
    pub normalize_votes: bool,
}

fn default_blur_ksize() -> u32 {
    DEFAULT_BLUR_KSIZE
}
fn default_canny_threshold1() -> f32 {
    DEFAULT_CANNY_THRESHOLD1
}
fn default_canny_threshold2() -> f32 {
    DEFAULT_CANNY_THRESHOLD2
}
fn default_min_radius() -> u32 {
    DEFAULT_MIN_RADIUS
}
fn default_max_radius() -> u32 {
    DEFAULT_MAX_RADIUS
}
fn default_radius_step() -> u32 {
    DEFAULT_RADIUS_STEP
}
fn default_hough_threshold_factor() -> f32 {
    DEFAULT_HOUGH_THRESHOLD_FACTOR
}
fn default_min_xdistance() -> u32 {
    DEFAULT_MIN_XDISTANCE
}
fn default_min_ydistance() -> u32 {
    DEFAULT_MIN_YDISTANCE
}
fn default_normalize_votes() -> bool {
    true
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blur_ksize: DEFAULT_BLUR_KSIZE,
            canny_threshold1: DEFAULT_CANNY_THRESHOLD1,
            canny_threshold2: DEFAULT_CANNY_THRESHOLD2,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            radius_step: DEFAULT_RADIUS_STEP,
            hough_threshold_factor: DEFAULT_HOUGH_THRESHOLD_FACTOR,
            min_xdistance: DEFAULT_MIN_XDISTANCE,
            min_ydistance: DEFAULT_MIN_YDISTANCE,
            max_circles: None,
            normalize_votes: true,
        }
    }
}

impl DetectionConfig {
    pub fn radius_range(&self) -> Result<RadiusRange> {
        RadiusRange::new(self.min_radius, self.max_radius, self.radius_step)
    }

    pub fn peak_params(&self) -> PeakParams {
        PeakParams {
            threshold_factor: self.hough_threshold_factor,
            min_xdistance: self.min_xdistance,
            min_ydistance: self.min_ydistance,
            max_peaks: self.max_circles,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.radius_range()?;

        let f = self.hough_threshold_factor;
        if !(f > 0.0 && f <= 1.0) {
            return Err(CircleError::InvalidConfig(format!(
                "hough_threshold_factor must be in (0, 1], got {f}"
            )));
        }
        if self.max_circles == Some(0) {
            return Err(CircleError::InvalidConfig(
                "max_circles must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
