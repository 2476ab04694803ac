//! Archive naming and placement.

use std::path::PathBuf;

/// Archive prefix used when neither config nor metadata provide one.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "session-saver@base-art.net";

/// Archive configuration.
///
/// Controls how the versioned archive is named and where it is written.
/// The file name is always `"{prefix}-{version}.zip"`.
///
/// # Configuration
///
/// Add to `dist.toml` next to `metadata.json`:
///
/// ```toml
/// archive_prefix = "session-saver@base-art.net"
/// use_uuid_prefix = false
/// output_dir = "dist"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSettings {
    /// Fixed prefix of the archive file name.
    ///
    /// Default: [`DEFAULT_ARCHIVE_PREFIX`]
    pub archive_prefix: String,

    /// Take the prefix from the metadata `uuid` field when it is present.
    ///
    /// Default: false
    pub use_uuid_prefix: bool,

    /// Directory the archive is written to, relative to the base directory
    /// unless absolute.
    ///
    /// Default: None (the base directory itself)
    pub output_dir: Option<PathBuf>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            use_uuid_prefix: false,
            output_dir: None,
        }
    }
}

/// Returns true when `prefix` can be used as the leading part of a file
/// name inside the archive directory.
///
/// Rejects blank values, path separators and the `.`/`..` directory names.
pub fn is_valid_prefix(prefix: &str) -> bool {
    let trimmed = prefix.trim();
    !trimmed.is_empty()
        && !prefix.contains(['/', '\\'])
        && !matches!(trimmed, "." | "..")
}
