//! Main release orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the release
//! sequence: read metadata, write the archive, create the tag.

use crate::{
    bundler::{
        Settings,
        archive::write_archive,
        error::{Error, ErrorExt, Result},
        utils::fs,
        vcs::{CommandOutcome, GitTagger, TagCommand},
    },
    metadata::{self, ExtensionMetadata},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{checksum::calculate_sha256, tool_detection::HAS_GIT};

/// Progress notices emitted while packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageEvent {
    /// A manifest file is about to be written into the archive.
    Packing(PathBuf),
    /// The tag command is about to run.
    Tagging(String),
}

type ProgressFn = Arc<dyn Fn(&PackageEvent) + Send + Sync>;

/// The archive produced by [`Bundler::package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArchive {
    /// Location of the zip file
    pub path: PathBuf,
    /// Extension version embedded in the file name
    pub version: u64,
    /// Entry names in the order they were written
    pub entries: Vec<String>,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
}

/// Everything a release produced.
#[derive(Debug, Clone)]
pub struct PackageReport {
    /// Metadata the release was built from
    pub metadata: ExtensionMetadata,
    /// The written archive
    pub archive: PackagedArchive,
    /// Outcome of the tag command, `None` when tagging is disabled
    pub tag: Option<CommandOutcome>,
}

impl PackageReport {
    /// True when the archive was written and the tag (if any) was created.
    pub fn is_complete(&self) -> bool {
        self.tag.as_ref().is_none_or(|outcome| outcome.success)
    }
}

/// What a release would do, resolved without side effects.
#[derive(Debug, Clone)]
pub struct PackagePlan {
    /// Metadata the release would be built from
    pub metadata: ExtensionMetadata,
    /// Where the archive would be written
    pub archive_path: PathBuf,
    /// Manifest entries, all verified to exist
    pub files: Vec<PathBuf>,
    /// Tag command line, `None` when tagging is disabled
    pub tag_command: Option<String>,
}

/// Release orchestrator.
///
/// Owns the [`Settings`] and the [`TagCommand`] used for the final step.
///
/// # Examples
///
/// ```no_run
/// use gnome_ext_bundler::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> gnome_ext_bundler::bundler::Result<()> {
/// let settings = SettingsBuilder::new().base_dir(".").build()?;
/// let report = Bundler::new(settings).package().await?;
///
/// println!("Created: {} ({} bytes)", report.archive.path.display(), report.archive.size);
/// println!("SHA256: {}", report.archive.checksum);
/// # Ok(())
/// # }
/// ```
pub struct Bundler<T = GitTagger> {
    settings: Settings,
    tagger: T,
    progress: ProgressFn,
}

impl<T> std::fmt::Debug for Bundler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("tagger", &std::any::type_name::<T>())
            .finish()
    }
}

impl Bundler<GitTagger> {
    /// Creates a bundler that tags with `git` from `PATH`.
    pub fn new(settings: Settings) -> Self {
        if settings.tag_enabled() {
            // Force the lookup so a missing git is logged before any work starts.
            let _ = *HAS_GIT;
        }
        Self::with_tagger(settings, GitTagger::new())
    }
}

impl<T: TagCommand> Bundler<T> {
    /// Creates a bundler with a custom tag implementation.
    pub fn with_tagger(settings: Settings, tagger: T) -> Self {
        Self {
            settings,
            tagger,
            progress: Arc::new(log_progress),
        }
    }

    /// Replaces the progress callback (default: `log::info!`).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&PackageEvent) + Send + Sync + 'static,
    {
        self.progress = Arc::new(callback);
        self
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the tag implementation.
    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    /// Loads `metadata.json` from the base directory.
    pub fn load_metadata(&self) -> Result<ExtensionMetadata> {
        metadata::load_metadata(self.settings.base_dir())
    }

    /// Path the archive is written to for the given metadata.
    pub fn archive_path(&self, metadata: &ExtensionMetadata) -> PathBuf {
        self.settings.archive_path(metadata)
    }

    /// Resolves metadata and manifest without writing or tagging.
    ///
    /// Fails the same way [`package`](Self::package) would on missing
    /// metadata or a missing manifest file.
    pub async fn dry_run(&self) -> Result<PackagePlan> {
        let metadata = self.load_metadata()?;

        for relative in self.settings.files() {
            fs::ensure_file(&self.settings.base_dir().join(relative)).await?;
        }

        let tag_command = self
            .settings
            .tag_enabled()
            .then(|| self.tagger.describe(&metadata.version.to_string()));

        Ok(PackagePlan {
            archive_path: self.archive_path(&metadata),
            files: self.settings.files().to_vec(),
            tag_command,
            metadata,
        })
    }

    /// Runs the release.
    ///
    /// 1. Parse `metadata.json` and extract `version`
    /// 2. Create (or truncate) `{prefix}-{version}.zip`
    /// 3. Pack each manifest file in order, emitting [`PackageEvent::Packing`]
    /// 4. Finalize and sync the archive
    /// 5. Emit [`PackageEvent::Tagging`] and create tag `{version}`
    ///
    /// # Errors
    ///
    /// - [`Error::Metadata`] before anything is written
    /// - [`Error::Fs`] when a manifest file is missing; the partial archive
    ///   is left on disk and no tag is created
    /// - [`Error::Command`] when the tag tool cannot be started
    ///
    /// A tag command that runs and fails is not an error: it is returned in
    /// [`PackageReport::tag`].
    pub async fn package(&self) -> Result<PackageReport> {
        let metadata = self.load_metadata()?;
        log::info!(
            "Packaging {} version {}",
            metadata.name.as_deref().unwrap_or("extension"),
            metadata.version
        );

        let archive = self.write_archive(&metadata).await?;

        let tag = if self.settings.tag_enabled() {
            Some(self.create_tag(metadata.version).await?)
        } else {
            log::info!("Tagging disabled, skipping tag {}", metadata.version);
            None
        };

        Ok(PackageReport {
            metadata,
            archive,
            tag,
        })
    }

    async fn write_archive(&self, metadata: &ExtensionMetadata) -> Result<PackagedArchive> {
        let archive_dir = self.settings.archive_dir();
        fs::create_dir_all(&archive_dir).await?;

        let path = self.archive_path(metadata);
        let base_dir = self.settings.base_dir().to_path_buf();
        let files = self.settings.files().to_vec();
        let progress = Arc::clone(&self.progress);

        // zip writing is blocking; keep it off the runtime threads
        let entries = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || {
                write_archive(&path, &base_dir, &files, |relative: &Path| {
                    progress(&PackageEvent::Packing(relative.to_path_buf()))
                })
            })
            .await
            .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))??
        };

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading archive metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;

        Ok(PackagedArchive {
            path,
            version: metadata.version,
            entries,
            size,
            checksum,
        })
    }

    async fn create_tag(&self, version: u64) -> Result<CommandOutcome> {
        let tag = version.to_string();
        (self.progress)(&PackageEvent::Tagging(self.tagger.describe(&tag)));
        self.tagger.create_tag(self.settings.base_dir(), &tag).await
    }
}

fn log_progress(event: &PackageEvent) {
    match event {
        PackageEvent::Packing(path) => log::info!("Packing {}", path.display()),
        PackageEvent::Tagging(command) => log::info!("{}", command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;
    use std::sync::Mutex;

    /// Records tag requests and answers with a fixed status.
    #[derive(Default)]
    struct RecordingTagger {
        calls: Mutex<Vec<(PathBuf, String)>>,
        fail: bool,
    }

    impl TagCommand for RecordingTagger {
        fn describe(&self, tag: &str) -> String {
            format!("git tag {tag}")
        }

        async fn create_tag(&self, repo_dir: &Path, tag: &str) -> Result<CommandOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((repo_dir.to_path_buf(), tag.to_string()));
            Ok(CommandOutcome {
                command: self.describe(tag),
                status: Some(if self.fail { 128 } else { 0 }),
                success: !self.fail,
                stdout: String::new(),
                stderr: if self.fail {
                    format!("fatal: tag '{tag}' already exists\n")
                } else {
                    String::new()
                },
            })
        }
    }

    fn extension_dir(version: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("COPYING"), "GNU GENERAL PUBLIC LICENSE\n").unwrap();
        std::fs::write(dir.path().join("README.rst"), "Session Saver\n=============\n").unwrap();
        std::fs::write(dir.path().join("extension.js"), "function init() {}\n").unwrap();
        std::fs::write(
            dir.path().join("metadata.json"),
            format!(r#"{{"uuid": "session-saver@base-art.net", "version": {version}}}"#),
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn packages_and_tags_once() {
        let dir = extension_dir("5");
        let settings = SettingsBuilder::new().base_dir(dir.path()).build().unwrap();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let bundler = Bundler::with_tagger(settings, RecordingTagger::default())
            .on_progress(move |e| sink.lock().unwrap().push(e.clone()));
        let report = bundler.package().await.unwrap();

        assert_eq!(
            report.archive.path,
            dir.path().join("session-saver@base-art.net-5.zip")
        );
        assert_eq!(
            report.archive.entries,
            ["COPYING", "README.rst", "extension.js", "metadata.json"]
        );
        assert_eq!(report.archive.checksum.len(), 64);
        assert!(report.is_complete());

        let calls = bundler.tagger().calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(dir.path().to_path_buf(), "5".to_string())]);

        let events = events.lock().unwrap().clone();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], PackageEvent::Packing(PathBuf::from("COPYING")));
        assert_eq!(events[4], PackageEvent::Tagging("git tag 5".to_string()));
    }

    #[tokio::test]
    async fn missing_manifest_file_skips_tag() {
        let dir = extension_dir("5");
        std::fs::remove_file(dir.path().join("README.rst")).unwrap();
        let settings = SettingsBuilder::new().base_dir(dir.path()).build().unwrap();

        let bundler = Bundler::with_tagger(settings, RecordingTagger::default());
        let err = bundler.package().await.unwrap_err();

        assert!(matches!(err, Error::Fs { .. }), "{err}");
        assert!(bundler.tagger().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_version_fails_before_output() {
        let dir = extension_dir("5");
        std::fs::write(dir.path().join("metadata.json"), r#"{"uuid": "x@y"}"#).unwrap();
        let settings = SettingsBuilder::new().base_dir(dir.path()).build().unwrap();

        let bundler = Bundler::with_tagger(settings, RecordingTagger::default());
        let err = bundler.package().await.unwrap_err();

        assert!(matches!(err, Error::Metadata { .. }), "{err}");
        let zips = std::fs::read_dir(dir.path())
            .unwrap()
            .filter(|e| e.as_ref().unwrap().path().extension().is_some_and(|x| x == "zip"))
            .count();
        assert_eq!(zips, 0);
        assert!(bundler.tagger().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_tag_is_reported() {
        let dir = extension_dir("9");
        let settings = SettingsBuilder::new().base_dir(dir.path()).build().unwrap();
        let tagger = RecordingTagger {
            fail: true,
            ..Default::default()
        };

        let report = Bundler::with_tagger(settings, tagger).package().await.unwrap();

        assert!(!report.is_complete());
        let outcome = report.tag.unwrap();
        assert_eq!(outcome.status, Some(128));
        assert!(outcome.stderr.contains("already exists"));
        assert!(report.archive.path.exists());
    }

    #[tokio::test]
    async fn tagging_can_be_disabled() {
        let dir = extension_dir("2");
        let settings = SettingsBuilder::new()
            .base_dir(dir.path())
            .tag(false)
            .build()
            .unwrap();

        let bundler = Bundler::with_tagger(settings, RecordingTagger::default());
        let report = bundler.package().await.unwrap();

        assert!(report.tag.is_none());
        assert!(report.is_complete());
        assert!(bundler.tagger().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn output_dir_is_created() {
        let dir = extension_dir("3");
        let settings = SettingsBuilder::new()
            .base_dir(dir.path())
            .output_dir("dist/releases")
            .tag(false)
            .build()
            .unwrap();

        let report = Bundler::with_tagger(settings, RecordingTagger::default())
            .package()
            .await
            .unwrap();

        assert_eq!(
            report.archive.path,
            dir.path().join("dist/releases/session-saver@base-art.net-3.zip")
        );
        assert!(report.archive.path.is_file());
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let dir = extension_dir("4");
        let settings = SettingsBuilder::new().base_dir(dir.path()).build().unwrap();

        let bundler = Bundler::with_tagger(settings, RecordingTagger::default());
        let plan = bundler.dry_run().await.unwrap();

        assert_eq!(plan.metadata.version, 4);
        assert_eq!(plan.tag_command.as_deref(), Some("git tag 4"));
        assert!(!plan.archive_path.exists());
        assert!(bundler.tagger().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dry_run_reports_missing_file() {
        let dir = extension_dir("4");
        std::fs::remove_file(dir.path().join("extension.js")).unwrap();
        let settings = SettingsBuilder::new().base_dir(dir.path()).build().unwrap();

        let err = Bundler::with_tagger(settings, RecordingTagger::default())
            .dry_run()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("extension.js"), "{err}");
    }
}
