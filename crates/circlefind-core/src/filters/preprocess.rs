use image::RgbImage;
use ndarray::Array2;
use tracing::debug;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::Frame;

use super::gaussian_blur::gaussian_blur;

/// Smoothed intensity plane ready for edge extraction.
#[derive(Clone, Debug)]
pub struct Preprocessed {
    pub frame: Frame,
    /// Kernel size actually used, always odd.
    pub ksize: u32,
}

/// Convert an RGB image to a BT.601 luminance plane in [0, 1].
pub fn to_intensity(image: &RgbImage) -> Frame {
    let (w, h) = image.dimensions();
    let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        let [r, g, b] = image.get_pixel(col as u32, row as u32).0;
        (LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32) / 255.0
    });
    Frame::new(data)
}

/// Grayscale conversion followed by Gaussian smoothing.
///
/// An even `blur_ksize` is bumped to the next odd value; the size used is
/// returned in [`Preprocessed::ksize`].
pub fn preprocess(image: &RgbImage, blur_ksize: u32) -> Preprocessed {
    let gray = to_intensity(image);
    let (frame, ksize) = gaussian_blur(&gray, blur_ksize);
    if ksize != blur_ksize {
        debug!(requested = blur_ksize, used = ksize, "Blur kernel size corrected to odd");
    }
    Preprocessed { frame, ksize }
}
