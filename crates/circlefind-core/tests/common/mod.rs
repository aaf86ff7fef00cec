use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use image::{Rgb, RgbImage};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use circlefind_core::detection::DetectionConfig;
use circlefind_core::pipeline::{BatchConfig, RenderConfig};

/// Black image with a filled disk of the given gray level.
pub fn disk_image(width: u32, height: u32, cx: i64, cy: i64, radius: i64, level: u8) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let dx = x as i64 - cx;
        let dy = y as i64 - cy;
        if dx * dx + dy * dy <= radius * radius {
            Rgb([level, level, level])
        } else {
            Rgb([0, 0, 0])
        }
    })
}

/// Detection parameters sized for small synthetic images.
pub fn small_detection_config() -> DetectionConfig {
    DetectionConfig {
        blur_ksize: 5,
        canny_threshold1: 25.0,
        canny_threshold2: 150.0,
        min_radius: 20,
        max_radius: 40,
        radius_step: 2,
        hough_threshold_factor: 0.45,
        min_xdistance: 15,
        min_ydistance: 15,
        max_circles: None,
        normalize_votes: true,
    }
}

pub fn batch_config(image_dir: &Path, output_dir: &Path) -> BatchConfig {
    BatchConfig {
        image_dir: image_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        detection: small_detection_config(),
        render: RenderConfig::default(),
    }
}

/// Write a 128x128 PNG with one disk of radius 30 centred at (64, 64).
pub fn write_disk_png(path: &Path) {
    disk_image(128, 128, 64, 64, 30, 220)
        .save(path)
        .expect("write disk png");
}

/// Sorted file names in `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Collects the messages of WARN events emitted by this crate.
#[derive(Clone, Default)]
pub struct WarnCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl WarnCapture {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("capture lock").clone()
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for WarnCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() != Level::WARN || !meta.target().starts_with("circlefind_core") {
            return;
        }
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.messages.lock().expect("capture lock").push(visitor.0);
    }
}

/// Run `f` with a subscriber that records WARN messages, returning both.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    use tracing_subscriber::layer::SubscriberExt;

    let capture = WarnCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture.messages())
}
