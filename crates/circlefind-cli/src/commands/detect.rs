use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use circlefind_core::consts::DEFAULT_JPEG_QUALITY;
use circlefind_core::pipeline::{CirclePipeline, RenderConfig};

use super::DetectionArgs;
use crate::summary::print_detections;

#[derive(Args)]
pub struct DetectArgs {
    /// Input image file
    pub file: PathBuf,

    /// Also write the comparison figure (JPEG) to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JPEG quality of the figure (1-100)
    #[arg(long, alias = "jpeg_quality", default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let render = RenderConfig {
        jpeg_quality: args.jpeg_quality,
    };
    let pipeline = CirclePipeline::new(&args.detection.to_config(), &render)
        .context("Invalid detection parameters")?;

    let analysis = pipeline
        .analyze_path(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    print_detections(&analysis);

    if let Some(ref output) = args.output {
        pipeline
            .write_figure(&analysis, output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Saved to {}", output.display());
    }

    Ok(())
}
