//! Core Settings struct and implementations.

use super::{BundleSettings, PackageSettings, is_valid_prefix};
use crate::metadata::ExtensionMetadata;
use std::path::{Path, PathBuf};

/// Main settings for packaging operations.
///
/// Central configuration for the packager, constructed via [`SettingsBuilder`].
/// The base directory is explicit so nothing depends on the process working
/// directory.
///
/// # Examples
///
/// ```no_run
/// use gnome_ext_bundler::bundler::SettingsBuilder;
///
/// # fn example() -> gnome_ext_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .base_dir("/home/me/src/session-saver")
///     .output_dir("dist")
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`SettingsBuilder`] - Builder for constructing Settings
/// - [`PackageSettings`] - Manifest of packaged files
/// - [`BundleSettings`] - Archive naming
///
/// [`SettingsBuilder`]: super::SettingsBuilder
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory holding `metadata.json` and the manifest files.
    base_dir: PathBuf,

    /// Manifest.
    package: PackageSettings,

    /// Archive configuration.
    bundle_settings: BundleSettings,

    /// Whether to create the release tag after writing the archive.
    tag: bool,
}

impl Settings {
    pub(super) fn new(
        base_dir: PathBuf,
        package: PackageSettings,
        bundle_settings: BundleSettings,
        tag: bool,
    ) -> Self {
        Self {
            base_dir,
            package,
            bundle_settings,
            tag,
        }
    }

    /// Returns the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the manifest entries in archive order.
    pub fn files(&self) -> &[PathBuf] {
        &self.package.files
    }

    /// Returns the archive configuration.
    pub fn bundle_settings(&self) -> &BundleSettings {
        &self.bundle_settings
    }

    /// Returns true when the release tag should be created.
    pub fn tag_enabled(&self) -> bool {
        self.tag
    }

    /// Resolves the archive prefix for the given metadata.
    ///
    /// The metadata `uuid` wins only when `use_uuid_prefix` is set and the
    /// field is present and usable as a file name. A `uuid` holding a path
    /// separator or naming `.`/`..` is ignored with a warning.
    pub fn archive_prefix<'a>(&'a self, metadata: &'a ExtensionMetadata) -> &'a str {
        if self.bundle_settings.use_uuid_prefix {
            match metadata.uuid.as_deref().filter(|u| !u.is_empty()) {
                Some(uuid) if is_valid_prefix(uuid) => return uuid,
                Some(uuid) => {
                    log::warn!(
                        "metadata uuid '{}' is not a valid file name; using '{}'",
                        uuid,
                        self.bundle_settings.archive_prefix
                    );
                    return &self.bundle_settings.archive_prefix;
                }
                None => {}
            }
            log::debug!(
                "use_uuid_prefix set but metadata has no uuid; using '{}'",
                self.bundle_settings.archive_prefix
            );
        }
        &self.bundle_settings.archive_prefix
    }

    /// Formats the archive file name, `"{prefix}-{version}.zip"`.
    pub fn archive_file_name(&self, metadata: &ExtensionMetadata) -> String {
        format!("{}-{}.zip", self.archive_prefix(metadata), metadata.version)
    }

    /// Returns the directory the archive is written to.
    pub fn archive_dir(&self) -> PathBuf {
        match &self.bundle_settings.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.base_dir.join(dir),
            None => self.base_dir.clone(),
        }
    }

    /// Returns the full path of the archive for the given metadata.
    pub fn archive_path(&self, metadata: &ExtensionMetadata) -> PathBuf {
        self.archive_dir().join(self.archive_file_name(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::super::SettingsBuilder;
    use crate::metadata::ExtensionMetadata;
    use std::path::PathBuf;

    fn metadata(version: u64, uuid: Option<&str>) -> ExtensionMetadata {
        ExtensionMetadata {
            version,
            uuid: uuid.map(String::from),
            name: None,
            description: None,
            shell_version: Vec::new(),
            url: None,
        }
    }

    #[test]
    fn default_archive_name_embeds_version() {
        let settings = SettingsBuilder::new().base_dir("/src/ext").build().unwrap();
        let meta = metadata(5, Some("other@example.org"));
        assert_eq!(settings.archive_file_name(&meta), "session-saver@base-art.net-5.zip");
        assert_eq!(
            settings.archive_path(&meta),
            PathBuf::from("/src/ext/session-saver@base-art.net-5.zip")
        );
    }

    #[test]
    fn uuid_prefix_when_enabled() {
        let settings = SettingsBuilder::new()
            .base_dir("/src/ext")
            .use_uuid_prefix(true)
            .build()
            .unwrap();
        assert_eq!(
            settings.archive_file_name(&metadata(7, Some("clock@example.org"))),
            "clock@example.org-7.zip"
        );
        assert_eq!(
            settings.archive_file_name(&metadata(7, None)),
            "session-saver@base-art.net-7.zip"
        );
    }

    #[test]
    fn uuid_with_path_components_falls_back_to_prefix() {
        let settings = SettingsBuilder::new()
            .base_dir("/src/ext")
            .use_uuid_prefix(true)
            .build()
            .unwrap();
        for uuid in ["../escaped", "nested/clock@example.org", "win\\clock", ".."] {
            let meta = metadata(5, Some(uuid));
            assert_eq!(settings.archive_prefix(&meta), "session-saver@base-art.net");
            assert_eq!(
                settings.archive_path(&meta),
                PathBuf::from("/src/ext/session-saver@base-art.net-5.zip")
            );
        }
    }

    #[test]
    fn relative_output_dir_is_under_base() {
        let settings = SettingsBuilder::new()
            .base_dir("/src/ext")
            .output_dir("dist")
            .build()
            .unwrap();
        assert_eq!(settings.archive_dir(), PathBuf::from("/src/ext/dist"));
    }

    #[test]
    fn absolute_output_dir_is_kept() {
        let settings = SettingsBuilder::new()
            .base_dir("/src/ext")
            .output_dir("/tmp/out")
            .build()
            .unwrap();
        assert_eq!(settings.archive_dir(), PathBuf::from("/tmp/out"));
    }
}
