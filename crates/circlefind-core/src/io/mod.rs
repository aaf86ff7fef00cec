pub mod discover;
pub mod image_io;

pub use discover::list_images;
pub use image_io::{figure_path, load_image, save_jpeg, FileDecoder, ImageDecoder};
