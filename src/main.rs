//! GNOME Extension Bundler - release packager for GNOME Shell extensions.
//!
//! This binary zips an extension's release files into a versioned archive
//! and tags the release in git.

use gnome_ext_bundler::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  hint: {}", suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
