#![allow(dead_code)]
//! Shared helpers for engine integration tests.

use searchlingo::SearchEngine;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

pub fn engine() -> SearchEngine {
    SearchEngine::bundled().expect("bundled engine")
}

/// Writes `contents` to `name` inside a fresh temporary directory. Keep the
/// returned directory alive for as long as the file is needed.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
