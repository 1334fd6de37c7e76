//! The reduce operation: one source image in, one smaller JPEG copy out.
//!
//! [`reduce_image`] combines the dimension math from
//! [`imaging::scaled_dimensions`](crate::imaging::scaled_dimensions) with a
//! backend execution. It decides *where* the output goes and *what size* it
//! should be; the backend does the pixel work.
//!
//! ## Output location
//!
//! The reduced copy is written next to the source, inside a subfolder:
//!
//! ```text
//! /photos/img_001.jpg  →  /photos/reduced/img_001.jpg
//! ```
//!
//! The output keeps the original filename verbatim (extension included) and
//! overwrites any previous copy. The payload is always JPEG. The subfolder is
//! created on demand; creating it again is a no-op.
//!
//! Skip-already-converted logic deliberately lives in the caller: re-running
//! on an already-converted source recomputes and overwrites.

use crate::imaging::{BackendError, ImageBackend, Quality, ReduceParams, Scale, scaled_dimensions};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("source path {0} has no parent directory or filename")]
    InvalidSourcePath(PathBuf),
    #[error("failed to read {path}: {source}")]
    Decode {
        path: PathBuf,
        source: BackendError,
    },
    #[error("scale yields degenerate dimensions {width}x{height} for {path}")]
    DegenerateDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to reduce {path}: {source}")]
    Reduce {
        path: PathBuf,
        source: BackendError,
    },
    #[error("output {0} missing after write")]
    OutputMissing(PathBuf),
}

/// Parameter set for a batch of reduce operations.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceOptions {
    pub scale: Scale,
    pub quality: Quality,
    /// Name of the output subfolder created next to each source file.
    pub output_folder: String,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            quality: Quality::default(),
            output_folder: "reduced".to_string(),
        }
    }
}

/// Compute the output path for a source file:
/// `<parent>/<folder>/<original filename>`.
pub fn output_path(source: &Path, folder: &str) -> Result<PathBuf, ReduceError> {
    let parent = source
        .parent()
        .ok_or_else(|| ReduceError::InvalidSourcePath(source.to_path_buf()))?;
    let name = source
        .file_name()
        .ok_or_else(|| ReduceError::InvalidSourcePath(source.to_path_buf()))?;
    Ok(parent.join(folder).join(name))
}

/// Reduce a single image: identify, compute scaled dimensions, resize and
/// re-encode as JPEG into the output subfolder. Returns the output path.
///
/// Dimensions that round down to zero are rejected before anything is
/// written. Failures are per-item and recoverable; the caller decides
/// whether to retry or move on.
pub fn reduce_image(
    backend: &impl ImageBackend,
    source: &Path,
    options: &ReduceOptions,
) -> Result<PathBuf, ReduceError> {
    let output = output_path(source, &options.output_folder)?;

    let dims = backend.identify(source).map_err(|e| ReduceError::Decode {
        path: source.to_path_buf(),
        source: e,
    })?;

    let (width, height) = scaled_dimensions((dims.width, dims.height), options.scale);
    if width == 0 || height == 0 {
        return Err(ReduceError::DegenerateDimensions {
            path: source.to_path_buf(),
            width,
            height,
        });
    }

    // Idempotent: succeeds if the folder already exists.
    let output_dir = output
        .parent()
        .ok_or_else(|| ReduceError::InvalidSourcePath(source.to_path_buf()))?;
    std::fs::create_dir_all(output_dir).map_err(|e| ReduceError::CreateDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    backend
        .reduce(&ReduceParams {
            source: source.to_path_buf(),
            output: output.clone(),
            width,
            height,
            quality: options.quality,
        })
        .map_err(|e| ReduceError::Reduce {
            path: source.to_path_buf(),
            source: e,
        })?;

    // Success is defined by the output actually being on disk.
    if !output.exists() {
        return Err(ReduceError::OutputMissing(output));
    }
    Ok(output)
}
