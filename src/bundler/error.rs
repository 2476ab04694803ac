//! Error types for packaging operations.
//!
//! Every fallible step of the packager returns [`Result`]. Filesystem errors
//! carry the operation and path through [`ErrorExt::fs_context`], and ad-hoc
//! failures are raised with [`bail!`](crate::bail) or [`Context::context`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while packaging an extension release.
#[derive(Error, Debug)]
pub enum Error {
    /// `metadata.json` is missing, malformed, or has no integer `version`.
    #[error("invalid extension metadata at {}: {reason}", path.display())]
    Metadata {
        /// Path of the metadata file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// `dist.toml` could not be read or parsed.
    #[error("invalid packaging config at {}: {reason}", path.display())]
    Config {
        /// Path of the config file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Filesystem operation failed on a specific path.
    #[error("{context} {}: {source}", path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path the operation was performed on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// External command could not be started.
    #[error("failed to run `{command}`: {reason}")]
    Command {
        /// Rendered command line
        command: String,
        /// Reason for the failure
        reason: String,
    },

    /// IO errors without path context.
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// Zip archive errors.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Catch-all for messages raised with `bail!` or `Context`.
    #[error("{0}")]
    GenericError(String),
}

/// Attach operation and path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Turn `Option`s and foreign errors into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Replaces the failure with the given message.
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
