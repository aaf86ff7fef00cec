use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ImageReader, RgbImage};

use crate::consts::OUTPUT_EXTENSION;
use crate::error::{CircleError, Result};
use crate::frame::SourceImage;

/// Source of decoded images for the batch.
///
/// The batch only distinguishes skippable decode failures
/// ([`CircleError::Decode`]) from everything else, so implementors should
/// report unreadable input that way.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<SourceImage>;
}

/// Decodes files from disk with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileDecoder;

impl ImageDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<SourceImage> {
        load_image(path)
    }
}

/// Load an image file as RGB. The format is guessed from the file content.
///
/// Any failure, including a failure to open the file, is reported as
/// [`CircleError::Decode`].
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let decoded = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.decode())
        .map_err(|source| CircleError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(SourceImage::new(path, decoded.to_rgb8()))
}

/// Where the figure for `source` is written inside `output_dir`.
pub fn figure_path(output_dir: &Path, source: &SourceImage) -> PathBuf {
    output_dir.join(format!("{}.{}", source.stem(), OUTPUT_EXTENSION))
}

/// Save an RGB figure as JPEG, overwriting any existing file.
///
/// The image is encoded in memory first; nothing is written when encoding
/// fails.
pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<()> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100)).encode_image(image)?;
    fs::write(path, &buf)?;
    Ok(())
}
