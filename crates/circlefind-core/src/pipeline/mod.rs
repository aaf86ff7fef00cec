pub mod config;
pub mod orchestrator;
pub mod types;

pub use config::{BatchConfig, RenderConfig};
pub use orchestrator::{run_batch, run_batch_reported, CirclePipeline};
pub use types::{
    BatchSummary, ImageAnalysis, ImageOutcome, NoOpReporter, PipelineStage, ProgressReporter,
};
