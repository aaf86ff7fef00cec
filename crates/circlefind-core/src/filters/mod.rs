pub mod gaussian_blur;
pub mod preprocess;

pub use gaussian_blur::{effective_kernel_size, gaussian_blur};
pub use preprocess::{preprocess, to_intensity, Preprocessed};
