//! Release packaging for GNOME Shell extensions.
//!
//! Reads the extension version, writes the versioned zip archive and creates
//! the release tag.

pub mod archive;
mod builder;
pub mod error;
pub mod settings;
pub mod utils;
pub mod vcs;

pub use builder::{
    Bundler, HAS_GIT, PackageEvent, PackagePlan, PackageReport, PackagedArchive, calculate_sha256,
};
pub use error::{Context, Error, ErrorExt, Result};
pub use settings::{BundleSettings, PackageSettings, Settings, SettingsBuilder};
pub use vcs::{CommandOutcome, GitTagger, TagCommand};
