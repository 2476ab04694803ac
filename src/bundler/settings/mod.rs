//! Configuration structures for packaging operations.
//!
//! This module provides the configuration types for a release: the manifest
//! of packaged files, archive naming, and a builder for constructing
//! validated settings.

mod builder;
mod bundle;
mod core;
mod package;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use bundle::{BundleSettings, DEFAULT_ARCHIVE_PREFIX, is_valid_prefix};
pub use self::core::Settings;
pub use package::{DEFAULT_FILES, PackageSettings};
