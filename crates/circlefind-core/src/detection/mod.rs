pub mod accumulator;
pub mod config;
pub mod edges;
pub mod peaks;
pub mod radius;
pub mod transform;

pub use accumulator::HoughAccumulator;
pub use config::DetectionConfig;
pub use edges::{CannyEdgeDetector, EdgeDetector, EdgeMap};
pub use peaks::{extract_peaks, CircleDetection, PeakParams};
pub use radius::RadiusRange;
pub use transform::{CircleTransform, HoughCircleTransform};
