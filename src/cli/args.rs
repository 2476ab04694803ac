//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation
//! for the values clap cannot check on its own.

use clap::Parser;
use std::path::PathBuf;

/// Release packager for GNOME Shell extensions
#[derive(Parser, Debug)]
#[command(
    name = "gnome_ext_bundler",
    version,
    about = "Release packager for GNOME Shell extensions",
    long_about = "Zips an extension's release files into a versioned archive and tags the release.

The version is read from metadata.json. The archive is named <prefix>-<version>.zip
and the tag is the bare version number.

Usage:
  gnome_ext_bundler
  gnome_ext_bundler --dir ~/src/session-saver --output-dir dist
  gnome_ext_bundler --file extension.js --file metadata.json --no-tag

Paths given with --config and --output-dir are relative to the current
directory. --file entries and the dist.toml output_dir are relative to DIR.

Exit code 0 = archive written and tag created.
Exit code 2 = archive written but the tag command failed."
)]
pub struct Args {
    /// Extension directory containing metadata.json
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        default_value = ".",
        env = "GNOME_EXT_BUNDLER_DIR"
    )]
    pub dir: PathBuf,

    /// Packaging config file, relative to the current directory
    /// (default: <DIR>/dist.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Archive file name prefix
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Use the metadata uuid as the archive prefix
    #[arg(long, conflicts_with = "prefix")]
    pub use_uuid_prefix: bool,

    /// File to package, relative to DIR (repeatable; replaces the default list)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Directory to write the archive to, relative to the current directory
    /// (dist.toml output_dir is relative to DIR)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip creating the release tag
    #[arg(long)]
    pub no_tag: bool,

    /// Show what would be packaged without writing or tagging
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print additional details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and warnings
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(prefix) = &self.prefix {
            if prefix.trim().is_empty() {
                return Err("Prefix cannot be empty".to_string());
            }
            if !crate::bundler::settings::is_valid_prefix(prefix) {
                return Err(format!("Prefix must be a file name, not a path: {prefix}"));
            }
        }

        if let Some(file) = self.files.iter().find(|f| f.is_absolute()) {
            return Err(format!(
                "Files must be relative to the extension directory: {}",
                file.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
