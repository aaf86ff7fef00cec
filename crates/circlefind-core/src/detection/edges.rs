use image::{GrayImage, Luma};
use imageproc::edges::canny;
use ndarray::Array2;

use crate::frame::Frame;

/// Binary edge map. `true` marks an edge pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMap {
    /// Shape = (height, width)
    pub data: Array2<bool>,
}

impl EdgeMap {
    pub fn new(data: Array2<bool>) -> Self {
        Self { data }
    }

    /// An edge map with no edge pixels.
    pub fn blank(height: usize, width: usize) -> Self {
        Self::new(Array2::from_elem((height, width), false))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.data.iter().any(|&e| e)
    }

    /// `(row, col)` of every edge pixel in row-major order.
    pub fn edge_points(&self) -> Vec<(usize, usize)> {
        self.data
            .indexed_iter()
            .filter(|(_, &e)| e)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Any non-zero pixel counts as an edge.
    pub fn from_gray_image(img: &GrayImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            img.get_pixel(col as u32, row as u32).0[0] != 0
        });
        Self::new(data)
    }

    /// White edges on black.
    pub fn to_gray_image(&self) -> GrayImage {
        let (h, w) = self.data.dim();
        let mut img = GrayImage::new(w as u32, h as u32);
        for ((row, col), &e) in self.data.indexed_iter() {
            if e {
                img.put_pixel(col as u32, row as u32, Luma([255]));
            }
        }
        img
    }
}

/// Turns a smoothed intensity plane into a binary edge map.
pub trait EdgeDetector: Send + Sync {
    fn detect(&self, frame: &Frame) -> EdgeMap;
}

/// Canny edge detection on the 8-bit rendition of the frame.
///
/// Thresholds are on the 8-bit gradient magnitude scale. If the low
/// threshold exceeds the high one they are swapped.
#[derive(Clone, Copy, Debug)]
pub struct CannyEdgeDetector {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl CannyEdgeDetector {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
        }
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect(&self, frame: &Frame) -> EdgeMap {
        let (h, w) = frame.data.dim();
        // Sobel needs a full 3x3 neighbourhood.
        if h < 3 || w < 3 {
            return EdgeMap::blank(h, w);
        }

        let (low, high) = if self.low_threshold <= self.high_threshold {
            (self.low_threshold, self.high_threshold)
        } else {
            (self.high_threshold, self.low_threshold)
        };

        let edges = canny(&frame.to_gray_image(), low, high);
        EdgeMap::from_gray_image(&edges)
    }
}
