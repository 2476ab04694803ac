//! Release orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that runs a
//! release end to end.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads `metadata.json` through [`Settings`](crate::bundler::Settings)
//! 2. Writes the manifest files into a versioned zip archive
//! 3. Calculates the archive size and checksum
//! 4. Creates the release tag and returns its outcome
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the archive
//! - [`orchestrator`] - Main [`Bundler`] struct and release operations
//! - [`tool_detection`] - External tool availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{Bundler, PackageEvent, PackagePlan, PackageReport, PackagedArchive};
pub use tool_detection::HAS_GIT;
