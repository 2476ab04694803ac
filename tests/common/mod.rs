//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub const COPYING: &[u8] = b"                    GNU GENERAL PUBLIC LICENSE\n                       Version 3, 29 June 2007\n";
pub const README: &[u8] = b"Session Saver\n=============\n\nRestores windows on login.\n";
pub const EXTENSION_JS: &[u8] = b"const GLib = imports.gi.GLib;\n\nfunction init() {\n    return null;\n}\n";

/// Creates an extension source directory with the four default release files.
pub fn extension_dir(version: u64) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("COPYING"), COPYING).unwrap();
    std::fs::write(dir.path().join("README.rst"), README).unwrap();
    std::fs::write(dir.path().join("extension.js"), EXTENSION_JS).unwrap();
    std::fs::write(dir.path().join("metadata.json"), metadata_json(version)).unwrap();
    dir
}

pub fn metadata_json(version: u64) -> String {
    format!(
        "{{\n  \"uuid\": \"session-saver@base-art.net\",\n  \"name\": \"Session Saver\",\n  \"shell-version\": [\"3.8\"],\n  \"version\": {version}\n}}\n"
    )
}

pub fn git_available() -> bool {
    which::which("git").is_ok()
}

pub fn run_git(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Turns `dir` into a git repository with one commit.
pub fn init_repo(dir: &Path) {
    run_git(dir, &["init", "-q"]);
    run_git(dir, &["config", "user.name", "test-user"]);
    run_git(dir, &["config", "user.email", "test@example.com"]);
    run_git(dir, &["config", "commit.gpgsign", "false"]);
    run_git(dir, &["config", "tag.gpgsign", "false"]);
    run_git(dir, &["add", "COPYING", "README.rst", "extension.js", "metadata.json"]);
    run_git(dir, &["commit", "-q", "-m", "initial"]);
}

pub fn zip_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".zip"))
        .collect();
    names.sort();
    names
}
