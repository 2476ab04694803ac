//! Release packager library for GNOME Shell extensions
//!
//! This library provides the release steps for an extension:
//! - Reading the version from `metadata.json`
//! - Zipping the release files into `<prefix>-<version>.zip`
//! - Tagging the release in git, with the outcome returned to the caller
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
