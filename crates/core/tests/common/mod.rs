//! Shared test helpers for `tspl_sim_core` integration tests.

#![allow(unreachable_pub)]

use std::path::PathBuf;
use tspl_sim_core::{ErrorKind, ValidationResult};

/// Header that satisfies the whole-document checks.
#[allow(dead_code)]
pub const HEADER: &str = "SIZE 50 mm, 30 mm\n";
/// Footer that satisfies the whole-document checks.
#[allow(dead_code)]
pub const FOOTER: &str = "PRINT 1\n";

/// Wrap body lines between [`HEADER`] and [`FOOTER`].
#[allow(dead_code)]
pub fn wrap(body: &str) -> String {
    format!("{HEADER}{body}\n{FOOTER}")
}

/// Kinds of every finding, in report order.
#[allow(dead_code)]
pub fn kinds(result: &ValidationResult) -> Vec<ErrorKind> {
    result.errors.iter().map(|e| e.kind).collect()
}

/// `(line, command)` of every finding, in report order.
#[allow(dead_code)]
pub fn locations(result: &ValidationResult) -> Vec<(usize, String)> {
    result
        .errors
        .iter()
        .map(|e| (e.line, e.command.clone()))
        .collect()
}

/// Repository-root `samples/` directory.
#[allow(dead_code)]
pub fn samples_dir() -> PathBuf {
    let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // crates/core -> repo root
    root.pop();
    root.pop();
    root.join("samples")
}
