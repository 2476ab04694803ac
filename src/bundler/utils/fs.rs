//! File system utilities for packaging.
//!
//! Provides idempotent directory creation and manifest file checks with
//! path-carrying errors.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// Succeeds when the directory already exists.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating output directory", path)
}

/// Checks that `path` exists and is a regular file.
///
/// Missing paths are reported as [`Error::Fs`] with `NotFound`, matching
/// what opening the file during packing would report.
pub async fn ensure_file(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .await
        .fs_context("opening manifest file", path)?;
    if !metadata.is_file() {
        return Err(Error::Fs {
            context: "opening manifest file",
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}
