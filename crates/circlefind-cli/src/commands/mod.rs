pub mod config;
pub mod detect;
pub mod run;

use clap::Args;
use circlefind_core::consts::{
    DEFAULT_BLUR_KSIZE, DEFAULT_CANNY_THRESHOLD1, DEFAULT_CANNY_THRESHOLD2,
    DEFAULT_HOUGH_THRESHOLD_FACTOR, DEFAULT_MAX_RADIUS, DEFAULT_MIN_RADIUS,
    DEFAULT_MIN_XDISTANCE, DEFAULT_MIN_YDISTANCE, DEFAULT_RADIUS_STEP,
};
use circlefind_core::detection::DetectionConfig;

/// Detection parameters shared by `run` and `detect`.
#[derive(Args, Clone, Debug)]
pub struct DetectionArgs {
    /// Kernel size for Gaussian blur (even values are bumped to the next odd one)
    #[arg(long, alias = "blur_ksize", default_value_t = DEFAULT_BLUR_KSIZE)]
    pub blur_ksize: u32,

    /// First (low) threshold for Canny edge detection
    #[arg(long, alias = "canny_threshold1", default_value_t = DEFAULT_CANNY_THRESHOLD1)]
    pub canny_threshold1: f32,

    /// Second (high) threshold for Canny edge detection
    #[arg(long, alias = "canny_threshold2", default_value_t = DEFAULT_CANNY_THRESHOLD2)]
    pub canny_threshold2: f32,

    /// Minimum radius for the Hough circle search
    #[arg(long, alias = "min_radius", default_value_t = DEFAULT_MIN_RADIUS)]
    pub min_radius: u32,

    /// Maximum radius for the Hough circle search (exclusive)
    #[arg(long, alias = "max_radius", default_value_t = DEFAULT_MAX_RADIUS)]
    pub max_radius: u32,

    /// Step between tested radii
    #[arg(long, alias = "radius_step", default_value_t = DEFAULT_RADIUS_STEP)]
    pub radius_step: u32,

    /// Fraction of the strongest vote a circle must reach
    #[arg(long, alias = "hough_threshold_factor", default_value_t = DEFAULT_HOUGH_THRESHOLD_FACTOR)]
    pub hough_threshold_factor: f32,

    /// Min distance between detected circle centers (x-axis)
    #[arg(long, alias = "min_xdistance", default_value_t = DEFAULT_MIN_XDISTANCE)]
    pub min_xdistance: u32,

    /// Min distance between detected circle centers (y-axis)
    #[arg(long, alias = "min_ydistance", default_value_t = DEFAULT_MIN_YDISTANCE)]
    pub min_ydistance: u32,

    /// Keep at most this many circles per image
    #[arg(long, alias = "max_circles")]
    pub max_circles: Option<usize>,

    /// Use raw vote counts instead of votes normalized by circle perimeter
    #[arg(long)]
    pub raw_votes: bool,
}

impl DetectionArgs {
    pub fn to_config(&self) -> DetectionConfig {
        DetectionConfig {
            blur_ksize: self.blur_ksize,
            canny_threshold1: self.canny_threshold1,
            canny_threshold2: self.canny_threshold2,
            min_radius: self.min_radius,
            max_radius: self.max_radius,
            radius_step: self.radius_step,
            hough_threshold_factor: self.hough_threshold_factor,
            min_xdistance: self.min_xdistance,
            min_ydistance: self.min_ydistance,
            max_circles: self.max_circles,
            normalize_votes: !self.raw_votes,
        }
    }
}
