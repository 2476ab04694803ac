//! Builder for constructing Settings.

use super::{BundleSettings, PackageSettings, Settings, is_valid_prefix};
use std::path::{Component, Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building packager settings with validation.
///
/// # Examples
///
/// ```no_run
/// use gnome_ext_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> gnome_ext_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .base_dir(".")
///     .files(vec!["extension.js".into(), "metadata.json".into()])
///     .archive_prefix("clock@example.org")
///     .tag(false)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SettingsBuilder {
    base_dir: Option<PathBuf>,
    package_settings: PackageSettings,
    bundle_settings: BundleSettings,
    tag: bool,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            base_dir: None,
            package_settings: PackageSettings::default(),
            bundle_settings: BundleSettings::default(),
            tag: true,
        }
    }
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the base directory holding `metadata.json` and the manifest files.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the manifest.
    ///
    /// Default: `COPYING`, `README.rst`, `extension.js`, `metadata.json`
    pub fn files(mut self, files: Vec<PathBuf>) -> Self {
        self.package_settings.files = files;
        self
    }

    /// Sets the archive file name prefix.
    pub fn archive_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.bundle_settings.archive_prefix = prefix.into();
        self
    }

    /// Takes the prefix from the metadata `uuid` when present.
    pub fn use_uuid_prefix(mut self, enabled: bool) -> Self {
        self.bundle_settings.use_uuid_prefix = enabled;
        self
    }

    /// Sets the directory the archive is written to.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.bundle_settings.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables or disables the release tag step.
    ///
    /// Default: true
    pub fn tag(mut self, enabled: bool) -> Self {
        self.tag = enabled;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_dir` is missing
    /// - the manifest is empty or contains an absolute or parent-relative path
    /// - the archive prefix is empty, `.`/`..`, or contains a path separator
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let base_dir = self.base_dir.context("base_dir is required")?;

        if self.package_settings.files.is_empty() {
            crate::bail!("manifest must list at least one file");
        }

        for file in &self.package_settings.files {
            let escapes = file
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes {
                crate::bail!(
                    "manifest entry {} must be a relative path inside the base directory",
                    file.display()
                );
            }
        }

        let prefix = &self.bundle_settings.archive_prefix;
        if prefix.trim().is_empty() {
            crate::bail!("archive prefix must not be empty");
        }
        if !is_valid_prefix(prefix) {
            crate::bail!("archive prefix '{prefix}' must be a file name, not a path");
        }

        Ok(Settings::new(
            base_dir,
            self.package_settings,
            self.bundle_settings,
            self.tag,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_base_dir() {
        let err = SettingsBuilder::new().build().unwrap_err();
        assert_eq!(err.to_string(), "base_dir is required");
    }

    #[test]
    fn default_manifest_and_tagging() {
        let settings = SettingsBuilder::new().base_dir(".").build().unwrap();
        let names: Vec<_> = settings.files().iter().map(|p| p.to_string_lossy()).collect();
        assert_eq!(names, ["COPYING", "README.rst", "extension.js", "metadata.json"]);
        assert!(settings.tag_enabled());
    }

    #[test]
    fn rejects_empty_manifest() {
        assert!(SettingsBuilder::new().base_dir(".").files(Vec::new()).build().is_err());
    }

    #[test]
    fn rejects_escaping_entries() {
        for bad in ["../secret", "/etc/passwd", "schemas/../../x"] {
            let result = SettingsBuilder::new()
                .base_dir(".")
                .files(vec![PathBuf::from(bad)])
                .build();
            assert!(result.is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn accepts_nested_entries() {
        let settings = SettingsBuilder::new()
            .base_dir(".")
            .files(vec![PathBuf::from("schemas/org.gnome.shell.gschema.xml")])
            .build()
            .unwrap();
        assert_eq!(settings.files().len(), 1);
    }

    #[test]
    fn rejects_blank_prefix() {
        assert!(SettingsBuilder::new().base_dir(".").archive_prefix("  ").build().is_err());
    }

    #[test]
    fn rejects_prefix_with_path_components() {
        for bad in ["../../cfg-escape", "dist/clock", "dist\\clock", ".."] {
            let err = SettingsBuilder::new()
                .base_dir(".")
                .archive_prefix(bad)
                .build()
                .unwrap_err();
            assert!(err.to_string().contains("must be a file name"), "{bad}: {err}");
        }
    }
}
