use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, RgbImage};
use ndarray::Array2;

/// A single-channel intensity plane.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
}

impl Frame {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Quantize to an 8-bit grayscale image, rounding to nearest.
    pub fn to_gray_image(&self) -> GrayImage {
        let (h, w) = self.data.dim();
        let mut img = GrayImage::new(w as u32, h as u32);
        for ((row, col), &v) in self.data.indexed_iter() {
            let val = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
        img
    }
}

/// A decoded input image together with where it came from.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub path: PathBuf,
    pub pixels: RgbImage,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, pixels: RgbImage) -> Self {
        Self {
            path: path.into(),
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// File name including extension, e.g. `coins.png`.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }

    /// File name without its extension, used to name the output figure.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
