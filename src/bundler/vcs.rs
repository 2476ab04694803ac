//! Release tagging through the version-control tool.
//!
//! The tag step is behind [`TagCommand`] so its outcome is a value the caller
//! can inspect instead of an exit status nobody reads.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Command line as shown to the user
    pub command: String,
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    /// True when the command exited successfully
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Creates a named tag in the repository containing the extension sources.
pub trait TagCommand {
    /// Renders the command line that [`create_tag`](Self::create_tag) runs.
    fn describe(&self, tag: &str) -> String;

    /// Creates `tag` in the repository at `repo_dir`.
    ///
    /// A command that runs and fails is reported as `Ok` with
    /// `success == false`; `Err` means the command could not be started.
    fn create_tag(
        &self,
        repo_dir: &Path,
        tag: &str,
    ) -> impl Future<Output = Result<CommandOutcome>> + Send;
}

/// Lightweight tags via `git tag <name>`.
#[derive(Debug, Clone)]
pub struct GitTagger {
    program: PathBuf,
}

impl Default for GitTagger {
    fn default() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }
}

impl GitTagger {
    /// Uses `git` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific git executable.
    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TagCommand for GitTagger {
    fn describe(&self, tag: &str) -> String {
        format!("{} tag {}", self.program.display(), tag)
    }

    async fn create_tag(&self, repo_dir: &Path, tag: &str) -> Result<CommandOutcome> {
        let command = self.describe(tag);

        let output = tokio::process::Command::new(&self.program)
            .args(["tag", tag])
            .current_dir(repo_dir)
            .output()
            .await
            .map_err(|e| Error::Command {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        let outcome = CommandOutcome {
            command,
            status: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if outcome.success {
            log::info!("Created tag {} in {}", tag, repo_dir.display());
        } else {
            log::warn!(
                "`{}` failed with exit code {:?}: {}",
                outcome.command,
                outcome.status,
                outcome.stderr.trim()
            );
        }

        Ok(outcome)
    }
}
