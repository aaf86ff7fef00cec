use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Input directory '{}' does not exist", .0.display())]
    InputDirMissing(PathBuf),

    #[error("Failed to create output directory '{}': {source}", .path.display())]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No images found in '{}'", .0.display())]
    NoImages(PathBuf),

    #[error("Could not decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid radius range: min={min}, max={max}, step={step}")]
    InvalidRadiusRange { min: u32, max: u32, step: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl CircleError {
    /// Whether the batch may skip the offending file and carry on.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

pub type Result<T> = std::result::Result<T, CircleError>;
