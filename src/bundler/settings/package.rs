//! Package contents: the manifest of files that go into the archive.

use std::path::PathBuf;

/// Files packaged when no manifest is configured, in archive order.
pub const DEFAULT_FILES: [&str; 4] = ["COPYING", "README.rst", "extension.js", "metadata.json"];

/// Package contents.
///
/// Holds the ordered manifest of files to bundle. Every path is relative to
/// the base directory and is stored in the archive under that same relative
/// name.
///
/// # Examples
///
/// ```no_run
/// use gnome_ext_bundler::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     files: vec!["extension.js".into(), "metadata.json".into()],
/// };
/// assert_eq!(settings.files.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSettings {
    /// Manifest entries, relative to the base directory.
    ///
    /// Default: [`DEFAULT_FILES`]
    pub files: Vec<PathBuf>,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            files: DEFAULT_FILES.iter().map(PathBuf::from).collect(),
        }
    }
}
