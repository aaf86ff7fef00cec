use std::path::PathBuf;

use crate::detection::{CircleDetection, EdgeMap};
use crate::frame::SourceImage;

/// Batch stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Discovering,
    Detecting,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovering => write!(f, "Listing images"),
            Self::Detecting => write!(f, "Detecting circles"),
        }
    }
}

/// Intermediate products of running detection on one image.
#[derive(Clone, Debug)]
pub struct ImageAnalysis {
    pub source: SourceImage,
    /// Blur kernel size actually used.
    pub blur_ksize: u32,
    pub edges: EdgeMap,
    /// Strongest first.
    pub detections: Vec<CircleDetection>,
}

/// What happened to one input file.
#[derive(Clone, Debug)]
pub enum ImageOutcome {
    Written {
        input: PathBuf,
        output: PathBuf,
        detections: Vec<CircleDetection>,
    },
    Skipped {
        input: PathBuf,
        reason: String,
    },
}

impl ImageOutcome {
    pub fn input(&self) -> &PathBuf {
        match self {
            Self::Written { input, .. } | Self::Skipped { input, .. } => input,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Per-file outcomes of a batch run, in processing order.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_skipped()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    pub fn total_detections(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                ImageOutcome::Written { detections, .. } => detections.len(),
                ImageOutcome::Skipped { .. } => 0,
            })
            .sum()
    }
}

/// Thread-safe progress reporting for the batch.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (e.g., file count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// A file has been handled, successfully or not.
    fn image_finished(&self, _outcome: &ImageOutcome) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used by `run_batch`.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
