use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CircleError, Result};

/// List the candidate image files in `dir`, sorted by file name.
///
/// Sub-directories and other non-file entries are ignored. Nothing is
/// filtered by extension; undecodable files are dealt with by the loader.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CircleError::InputDirMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Ignoring non-file entry");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
