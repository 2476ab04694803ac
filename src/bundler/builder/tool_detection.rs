//! External tool detection and availability checking.
//!
//! The release tag is created with the `git` command line tool; this module
//! checks once whether it can be found on `PATH`.

use std::sync::LazyLock;

/// Check if git is available for creating the release tag.
///
/// Cached result to avoid repeated lookups.
pub static HAS_GIT: LazyLock<bool> = LazyLock::new(|| match which::which("git") {
    Ok(path) => {
        log::debug!("Found git at: {}", path.display());
        true
    }
    Err(e) => {
        log::warn!("git not found in PATH: {}. Creating the release tag will fail.", e);
        false
    }
});
