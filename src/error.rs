//! Top-level error types for the packager binary.
//!
//! This module defines the errors surfaced to the user, with recovery
//! suggestions for the common failure modes.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for the packager binary
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error;

        match self {
            Self::Bundler(Error::Metadata { .. }) => vec![
                "Run from the extension directory or pass --dir".to_string(),
                "metadata.json must be a JSON object with an integer \"version\"".to_string(),
            ],
            Self::Bundler(Error::Config { .. }) => vec![
                "Check dist.toml keys: archive_prefix, use_uuid_prefix, files, output_dir, tag"
                    .to_string(),
            ],
            Self::Bundler(Error::Fs { path, .. }) => vec![format!(
                "Make sure {} exists and is readable; a partial archive may have been left behind",
                path.display()
            )],
            Self::Bundler(Error::Command { .. }) => {
                vec!["Install git or make sure it is on PATH".to_string()]
            }
            Self::Cli(_) => vec!["Run with --help for usage".to_string()],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
