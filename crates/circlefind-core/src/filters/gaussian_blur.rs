use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Frame;

/// Round a requested kernel size up to the next odd value.
///
/// Odd sizes are returned unchanged; even sizes (including 0) become `k + 1`.
pub fn effective_kernel_size(ksize: u32) -> u32 {
    if ksize % 2 == 0 {
        ksize + 1
    } else {
        ksize
    }
}

/// Sigma implied by an odd kernel size when none is given explicitly:
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel_size(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply Gaussian blur to a frame with a square kernel of (at least) `ksize`.
///
/// Returns the blurred frame and the kernel size actually used.
pub fn gaussian_blur(frame: &Frame, ksize: u32) -> (Frame, u32) {
    let k = effective_kernel_size(ksize);
    let blurred = gaussian_blur_array(&frame.data, k);
    (Frame::new(blurred), k)
}

/// Apply Gaussian blur to a raw array. `ksize` must already be odd.
pub fn gaussian_blur_array(data: &Array2<f32>, ksize: u32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(ksize);
    if kernel.len() == 1 {
        return data.clone();
    }
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(ksize: u32) -> Vec<f32> {
    let size = effective_kernel_size(ksize) as usize;
    let radius = size / 2;
    let sigma = sigma_for_kernel_size(size as u32);
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_at = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col = (col as isize + ki as isize - radius as isize)
                        .clamp(0, w as isize - 1) as usize;
                    sum += data[[row, src_col]] * kv;
                }
                sum
            })
            .collect()
    };

    collect_rows(h, w, row_at)
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_at = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row = (row as isize + ki as isize - radius as isize)
                        .clamp(0, h as isize - 1) as usize;
                    sum += data[[src_row, col]] * kv;
                }
                sum
            })
            .collect()
    };

    collect_rows(h, w, row_at)
}

/// Evaluate `row_at` for every row, in parallel for large planes.
fn collect_rows(h: usize, w: usize, row_at: impl Fn(usize) -> Vec<f32> + Sync) -> Array2<f32> {
    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(&row_at).collect()
    } else {
        (0..h).map(&row_at).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
