//! Optional packaging configuration from `dist.toml`

use crate::bundler::{Error, Result, SettingsBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up next to `metadata.json`.
pub const CONFIG_FILE: &str = "dist.toml";

/// Packaging overrides read from `dist.toml`.
///
/// Every key is optional; absent keys keep the built-in defaults.
///
/// ```toml
/// archive_prefix = "session-saver@base-art.net"
/// use_uuid_prefix = false
/// files = ["COPYING", "README.rst", "extension.js", "metadata.json"]
/// output_dir = "dist"
/// tag = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DistConfig {
    /// Archive file name prefix
    pub archive_prefix: Option<String>,

    /// Take the prefix from the metadata `uuid`
    pub use_uuid_prefix: Option<bool>,

    /// Manifest, relative to the base directory
    pub files: Option<Vec<PathBuf>>,

    /// Archive output directory
    pub output_dir: Option<PathBuf>,

    /// Create the release tag
    pub tag: Option<bool>,
}

impl DistConfig {
    /// Loads `dist.toml` from `base_dir`, or the defaults when it does not exist.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {} in {}, using defaults", CONFIG_FILE, base_dir.display());
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Loads an explicit config file; a missing file is an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: format!("failed to read: {e}"),
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::info!("Loaded packaging config from {}", path.display());
        Ok(config)
    }

    /// Applies the values that are set on top of `builder`.
    pub fn apply(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(prefix) = &self.archive_prefix {
            builder = builder.archive_prefix(prefix.clone());
        }
        if let Some(enabled) = self.use_uuid_prefix {
            builder = builder.use_uuid_prefix(enabled);
        }
        if let Some(files) = &self.files {
            builder = builder.files(files.clone());
        }
        if let Some(dir) = &self.output_dir {
            builder = builder.output_dir(dir);
        }
        if let Some(enabled) = self.tag {
            builder = builder.tag(enabled);
        }
        builder
    }
}
