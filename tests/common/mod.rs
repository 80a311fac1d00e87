//! Shared utilities for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;

/// Set a test-private endpoint variable and return its name.
///
/// Every test passes a distinct `name` so parallel tests never share a variable.
pub fn set_endpoint(name: &str, value: &str) -> String {
    let var = format!("CSI_HOSTPATH_IT_{}", name.to_uppercase());
    std::env::set_var(&var, value);
    var
}

/// A fresh directory plus a socket path inside it that does not exist yet.
#[allow(dead_code)]
pub fn sock_path(file: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file);
    (dir, path)
}
