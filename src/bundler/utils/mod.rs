//! Shared helpers for packaging operations.

pub mod fs;
