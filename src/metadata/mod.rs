//! Extension metadata discovery from `metadata.json`

use crate::bundler::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// File name GNOME Shell expects for extension metadata.
pub const METADATA_FILE: &str = "metadata.json";

/// Extension metadata extracted from `metadata.json`
///
/// Only `version` is required; the remaining fields are informational and
/// used for logging and for deriving the archive prefix from `uuid`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtensionMetadata {
    /// Integer release number, also used as the tag name
    pub version: u64,

    /// Extension identifier (e.g., "session-saver@base-art.net")
    #[serde(default)]
    pub uuid: Option<String>,

    /// Human-readable extension name
    #[serde(default)]
    pub name: Option<String>,

    /// Short description shown on extensions.gnome.org
    #[serde(default)]
    pub description: Option<String>,

    /// GNOME Shell versions the extension declares support for
    #[serde(default, rename = "shell-version")]
    pub shell_version: Vec<String>,

    /// Project homepage
    #[serde(default)]
    pub url: Option<String>,
}

/// Load `metadata.json` from the given directory.
pub fn load_metadata(base_dir: &Path) -> Result<ExtensionMetadata> {
    load_metadata_file(&base_dir.join(METADATA_FILE))
}

/// Load extension metadata from an explicit file path.
///
/// A missing file, malformed JSON, and a missing or non-integer `version`
/// are all reported as [`Error::Metadata`].
pub fn load_metadata_file(path: &Path) -> Result<ExtensionMetadata> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Metadata {
        path: path.to_path_buf(),
        reason: format!("failed to read: {e}"),
    })?;

    let metadata = parse_metadata(&contents).map_err(|reason| Error::Metadata {
        path: path.to_path_buf(),
        reason,
    })?;

    log::debug!(
        "Loaded metadata for {} (version {}, shell {:?})",
        metadata.uuid.as_deref().unwrap_or("<no uuid>"),
        metadata.version,
        metadata.shell_version
    );

    Ok(metadata)
}

/// Parse metadata JSON, describing the failure in plain words.
fn parse_metadata(contents: &str) -> std::result::Result<ExtensionMetadata, String> {
    let value: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| format!("malformed JSON: {e}"))?;

    let object = value
        .as_object()
        .ok_or_else(|| "top-level value is not a JSON object".to_string())?;

    match object.get("version") {
        None => return Err("missing 'version' field".to_string()),
        Some(v) if v.as_u64().is_none() => {
            return Err(format!("'version' must be a non-negative integer, found {v}"));
        }
        Some(_) => {}
    }

    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// Returns true when a metadata file is present in `base_dir`.
pub fn has_metadata(base_dir: &Path) -> bool {
    base_dir.join(METADATA_FILE).is_file()
}
