//! Command line interface for the extension packager.
//!
//! This module turns parsed arguments into [`Settings`], runs the release,
//! and maps the outcome to a process exit code.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Bundler, PackageEvent, PackageReport, Settings, SettingsBuilder};
use crate::config::DistConfig;
use crate::error::{CliError, Result};
use anyhow::Context as _;

/// Exit code when the archive was written but tagging failed.
pub const EXIT_TAG_FAILED: i32 = 2;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime_config = RuntimeConfig::from(&args);
    execute(&args, &runtime_config).await
}

/// Run a release for already-parsed arguments.
pub async fn execute(args: &Args, runtime_config: &RuntimeConfig) -> Result<i32> {
    let settings = build_settings(args)?;
    runtime_config.verbose_println(&format!(
        "Extension directory: {}",
        settings.base_dir().display()
    ))?;

    let output = *runtime_config.output();
    let bundler = Bundler::new(settings).on_progress(move |event| {
        let line = match event {
            PackageEvent::Packing(path) => format!("Packing {}", path.display()),
            PackageEvent::Tagging(command) => command.clone(),
        };
        if let Err(e) = output.progress(&line) {
            log::warn!("Failed to write progress: {}", e);
        }
    });

    if args.dry_run {
        let plan = bundler.dry_run().await?;
        runtime_config.progress(&format!(
            "Would write {} (version {})",
            plan.archive_path.display(),
            plan.metadata.version
        ))?;
        for file in &plan.files {
            runtime_config.indent(&file.display().to_string())?;
        }
        match plan.tag_command {
            Some(command) => runtime_config.progress(&format!("Would run: {command}"))?,
            None => runtime_config.progress("Would skip tagging")?,
        }
        return Ok(0);
    }

    let report = bundler.package().await?;
    report_outcome(&report, runtime_config)
}

/// Build packager settings: built-in defaults, then `dist.toml`, then flags.
///
/// Paths passed as flags (`--config`, `--output-dir`) are relative to the
/// process working directory; paths inside `dist.toml` are relative to the
/// extension directory.
pub fn build_settings(args: &Args) -> Result<Settings> {
    let base_dir = std::fs::canonicalize(&args.dir).with_context(|| {
        format!("Extension directory not found: {}", args.dir.display())
    })?;

    let dist_config = match &args.config {
        Some(path) => DistConfig::load_file(path)?,
        None => DistConfig::load(&base_dir)?,
    };

    let mut builder = dist_config.apply(SettingsBuilder::new().base_dir(&base_dir));

    if let Some(prefix) = &args.prefix {
        builder = builder.archive_prefix(prefix.clone()).use_uuid_prefix(false);
    }
    if args.use_uuid_prefix {
        builder = builder.use_uuid_prefix(true);
    }
    if !args.files.is_empty() {
        builder = builder.files(args.files.clone());
    }
    if let Some(dir) = &args.output_dir {
        let dir = std::path::absolute(dir)
            .with_context(|| format!("Cannot resolve output directory: {}", dir.display()))?;
        builder = builder.output_dir(dir);
    }
    if args.no_tag {
        builder = builder.tag(false);
    }

    Ok(builder.build()?)
}

fn report_outcome(report: &PackageReport, runtime_config: &RuntimeConfig) -> Result<i32> {
    let archive = &report.archive;
    runtime_config.success(&format!(
        "Created {} ({} bytes)",
        archive.path.display(),
        archive.size
    ))?;
    runtime_config.indent(&format!("SHA256: {}", archive.checksum))?;
    if runtime_config.output().is_verbose() {
        for entry in &archive.entries {
            runtime_config.indent(entry)?;
        }
    }

    match &report.tag {
        None => Ok(0),
        Some(outcome) if outcome.success => {
            runtime_config.success(&format!("Tagged release {}", archive.version))?;
            Ok(0)
        }
        Some(outcome) => {
            let failure = CliError::ExecutionFailed {
                command: outcome.command.clone(),
                reason: match outcome.status {
                    Some(code) => format!("exit code {code}: {}", outcome.stderr.trim()),
                    None => format!("terminated by signal: {}", outcome.stderr.trim()),
                },
            };
            runtime_config.warn(&failure.to_string())?;
            runtime_config.warn(&format!(
                "Archive {} was kept; tag {} was not created",
                archive.path.display(),
                archive.version
            ))?;
            Ok(EXIT_TAG_FAILED)
        }
    }
}
