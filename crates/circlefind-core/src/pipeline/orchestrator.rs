use std::fs;
use std::path::Path;

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::detection::{
    CannyEdgeDetector, CircleTransform, DetectionConfig, EdgeDetector, HoughCircleTransform,
};
use crate::error::{CircleError, Result};
use crate::filters::preprocess::preprocess;
use crate::frame::{display_name, SourceImage};
use crate::io::{figure_path, list_images, save_jpeg, FileDecoder, ImageDecoder};
use crate::render::{annotate, compose_figure};

use super::config::{BatchConfig, RenderConfig};
use super::types::{
    BatchSummary, ImageAnalysis, ImageOutcome, NoOpReporter, PipelineStage, ProgressReporter,
};

/// Loader, preprocessor, edge extractor, circle search and renderer wired
/// together. Each stage behind a trait can be swapped out.
pub struct CirclePipeline {
    decoder: Box<dyn ImageDecoder>,
    edge_detector: Box<dyn EdgeDetector>,
    circle_transform: Box<dyn CircleTransform>,
    blur_ksize: u32,
    render_config: RenderConfig,
}

impl CirclePipeline {
    /// Default stages (file decoder, Canny, Hough) for a validated config.
    pub fn new(detection: &DetectionConfig, render: &RenderConfig) -> Result<Self> {
        detection.validate()?;
        render.validate()?;
        Ok(Self {
            decoder: Box::new(FileDecoder),
            edge_detector: Box::new(CannyEdgeDetector::new(
                detection.canny_threshold1,
                detection.canny_threshold2,
            )),
            circle_transform: Box::new(HoughCircleTransform::from_config(detection)?),
            blur_ksize: detection.blur_ksize,
            render_config: render.clone(),
        })
    }

    pub fn from_config(config: &BatchConfig) -> Result<Self> {
        Self::new(&config.detection, &config.render)
    }

    pub fn with_decoder(mut self, decoder: Box<dyn ImageDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_edge_detector(mut self, edge_detector: Box<dyn EdgeDetector>) -> Self {
        self.edge_detector = edge_detector;
        self
    }

    pub fn with_circle_transform(mut self, circle_transform: Box<dyn CircleTransform>) -> Self {
        self.circle_transform = circle_transform;
        self
    }

    /// Preprocess, extract edges and search for circles in a decoded image.
    pub fn analyze(&self, source: SourceImage) -> ImageAnalysis {
        let pre = preprocess(&source.pixels, self.blur_ksize);
        let edges = self.edge_detector.detect(&pre.frame);
        debug!(
            image = %source.file_name(),
            blur_ksize = pre.ksize,
            edge_pixels = edges.edge_count(),
            "Edges extracted"
        );
        let detections = self.circle_transform.find_circles(&edges);

        ImageAnalysis {
            source,
            blur_ksize: pre.ksize,
            edges,
            detections,
        }
    }

    /// Decode `path` and analyze it. Decode failures surface as
    /// [`CircleError::Decode`].
    pub fn analyze_path(&self, path: &Path) -> Result<ImageAnalysis> {
        let source = self.decoder.decode(path)?;
        Ok(self.analyze(source))
    }

    /// Three-panel comparison figure for an analysis.
    pub fn render(&self, analysis: &ImageAnalysis) -> RgbImage {
        let annotated = annotate(&analysis.source.pixels, &analysis.detections);
        compose_figure(
            &analysis.source.pixels,
            &analysis.edges.to_gray_image(),
            &annotated,
        )
    }

    /// Render the figure and write it as JPEG to `path`.
    pub fn write_figure(&self, analysis: &ImageAnalysis, path: &Path) -> Result<()> {
        let figure = self.render(analysis);
        save_jpeg(&figure, path, self.render_config.jpeg_quality)
    }

    /// Run one file end to end. Undecodable input is logged and reported as
    /// [`ImageOutcome::Skipped`]; any other failure is returned.
    pub fn process_file(&self, path: &Path, output_dir: &Path) -> Result<ImageOutcome> {
        let name = display_name(path);
        info!("Processing {name}");
        let analysis = match self.analyze_path(path) {
            Ok(analysis) => analysis,
            Err(e) if e.is_skippable() => {
                warn!("Could not read {name}. Skipping...");
                debug!(error = %e, "Decode failure");
                return Ok(ImageOutcome::Skipped {
                    input: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        info!(circles = analysis.detections.len(), "Detected circles in {name}");

        let output = figure_path(output_dir, &analysis.source);
        self.write_figure(&analysis, &output)?;
        info!("Saved results to {}", output.display());

        Ok(ImageOutcome::Written {
            input: path.to_path_buf(),
            output,
            detections: analysis.detections,
        })
    }

    /// Process every file in `image_dir`, writing figures into `output_dir`.
    ///
    /// Fails before touching `output_dir` if `image_dir` is missing, and
    /// after creating it if `image_dir` holds no files.
    pub fn run_batch(
        &self,
        image_dir: &Path,
        output_dir: &Path,
        reporter: &dyn ProgressReporter,
    ) -> Result<BatchSummary> {
        reporter.begin_stage(PipelineStage::Discovering, None);
        let files = list_images(image_dir)?;
        reporter.finish_stage();

        fs::create_dir_all(output_dir).map_err(|source| CircleError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source,
        })?;

        if files.is_empty() {
            return Err(CircleError::NoImages(image_dir.to_path_buf()));
        }
        info!(files = files.len(), "Found input files");

        reporter.begin_stage(PipelineStage::Detecting, Some(files.len()));
        let mut summary = BatchSummary::default();
        for (i, path) in files.iter().enumerate() {
            let outcome = self.process_file(path, output_dir)?;
            reporter.image_finished(&outcome);
            reporter.advance(i + 1);
            summary.outcomes.push(outcome);
        }
        reporter.finish_stage();

        info!(
            processed = summary.processed(),
            skipped = summary.skipped(),
            circles = summary.total_detections(),
            "Batch complete"
        );
        Ok(summary)
    }
}

/// Run a batch with the default stages and no progress reporting.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    run_batch_reported(config, &NoOpReporter)
}

/// Run a batch with the default stages, reporting progress to `reporter`.
pub fn run_batch_reported(
    config: &BatchConfig,
    reporter: &dyn ProgressReporter,
) -> Result<BatchSummary> {
    let pipeline = CirclePipeline::from_config(config)?;
    pipeline.run_batch(&config.image_dir, &config.output_dir, reporter)
}
