//! Zip archive writer for the release bundle.
//!
//! The archive handle is scoped: `zip::ZipWriter` writes its central
//! directory when dropped, so an early return in the middle of the manifest
//! still leaves a finalized (partial) archive on disk.

use crate::bundler::error::{ErrorExt, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use zip::write::SimpleFileOptions;
use time::OffsetDateTime;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Writes every manifest file into a new zip archive at `archive_path`.
///
/// Entries are added in manifest order under their relative path (always
/// `/`-separated). `on_entry` is called before each file is packed.
/// An existing file at `archive_path` is truncated.
///
/// # Returns
///
/// The entry names written, in order.
pub fn write_archive<F>(
    archive_path: &Path,
    base_dir: &Path,
    files: &[PathBuf],
    mut on_entry: F,
) -> Result<Vec<String>>
where
    F: FnMut(&Path),
{
    if archive_path.exists() {
        log::warn!("Overwriting existing archive {}", archive_path.display());
    }

    let file = File::create(archive_path).fs_context("creating archive", archive_path)?;
    let mut writer = ZipWriter::new(file);
    let mut entries = Vec::with_capacity(files.len());

    for relative in files {
        on_entry(relative);

        let source = base_dir.join(relative);
        let mut input = File::open(&source).fs_context("opening manifest file", &source)?;
        let metadata = input
            .metadata()
            .fs_context("reading manifest file metadata", &source)?;
        if !metadata.is_file() {
            crate::bail!("manifest entry {} is not a regular file", source.display());
        }

        let name = entry_name(relative);
        writer.start_file(name.as_str(), entry_options(&metadata))?;
        std::io::copy(&mut input, &mut writer).fs_context("packing manifest file", &source)?;

        log::debug!("Packed {} ({} bytes)", name, metadata.len());
        entries.push(name);
    }

    let file = writer.finish()?;
    file.sync_all().fs_context("syncing archive", archive_path)?;

    Ok(entries)
}

/// Converts a relative manifest path to a zip entry name.
pub fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Entry options carrying the source file's permissions and mtime.
fn entry_options(metadata: &std::fs::Metadata) -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let options = match modified_time(metadata) {
        Some(modified) => options.last_modified_time(modified),
        None => options,
    };

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode() & 0o777)
    };

    options
}

/// Source mtime in UTC as a zip timestamp. `None` outside 1980..=2107 or
/// where the platform has no mtime.
fn modified_time(metadata: &std::fs::Metadata) -> Option<DateTime> {
    let modified = metadata.modified().ok()?;
    match DateTime::try_from(OffsetDateTime::from(modified)) {
        Ok(stamp) => Some(stamp),
        Err(e) => {
            log::debug!("mtime not representable in zip ({e}); using packaging time");
            None
        }
    }
}

/// Lists the entry names of an existing archive, in stored order.
pub fn list_entries(archive_path: &Path) -> Result<Vec<String>> {
    let file = File::open(archive_path).fs_context("opening archive", archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        names.push(archive.by_index(index)?.name().to_string());
    }
    Ok(names)
}

/// Reads one entry of an archive back into memory.
pub fn read_entry(archive_path: &Path, name: &str) -> Result<Vec<u8>> {
    let file = File::open(archive_path).fs_context("opening archive", archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entry = archive.by_name(name)?;

    let mut contents = Vec::new();
    entry
        .read_to_end(&mut contents)
        .fs_context("reading archive entry", archive_path)?;
    Ok(contents)
}
