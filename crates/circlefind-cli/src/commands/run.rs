use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use circlefind_core::consts::{DEFAULT_IMAGE_DIR, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_DIR};
use circlefind_core::pipeline::{
    run_batch_reported, BatchConfig, ImageOutcome, PipelineStage, ProgressReporter, RenderConfig,
};
use indicatif::{ProgressBar, ProgressStyle};

use super::DetectionArgs;
use crate::summary::{print_batch_summary, print_run_header};

#[derive(Args)]
pub struct RunArgs {
    /// Directory containing images
    #[arg(long, alias = "image_dir", default_value = DEFAULT_IMAGE_DIR)]
    pub image_dir: PathBuf,

    /// Directory to save processed images
    #[arg(long, alias = "output_dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Batch config file (TOML); replaces all other options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JPEG quality of the output figures (1-100)
    #[arg(long, alias = "jpeg_quality", default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

/// Drives an indicatif bar from batch progress callbacks.
struct BarReporter {
    pb: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        self.pb.set_message(stage.to_string());
        self.pb.set_position(0);
        if let Some(total) = total_items {
            self.pb.set_length(total as u64);
        }
    }

    fn advance(&self, items_done: usize) {
        self.pb.set_position(items_done as u64);
    }

    fn image_finished(&self, outcome: &ImageOutcome) {
        if let ImageOutcome::Skipped { input, .. } = outcome {
            self.pb.println(format!("  skipped {}", input.display()));
        }
    }
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        BatchConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else {
        build_config_from_args(args)
    };

    print_run_header(&config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { pb };

    let summary = match run_batch_reported(&config, &reporter) {
        Ok(summary) => summary,
        Err(e) => {
            reporter.pb.finish_and_clear();
            return Err(e).context("Batch run aborted");
        }
    };

    reporter.pb.finish_with_message("Done");
    print_batch_summary(&summary, &config.output_dir);

    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> BatchConfig {
    BatchConfig {
        image_dir: args.image_dir.clone(),
        output_dir: args.output_dir.clone(),
        detection: args.detection.to_config(),
        render: RenderConfig {
            jpeg_quality: args.jpeg_quality,
        },
    }
}
