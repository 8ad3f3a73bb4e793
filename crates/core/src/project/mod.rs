pub mod scanner;
pub mod source;
pub mod state;

use std::path::Path;

/// Directories never descended into: build outputs and installed dependencies.
pub const PRUNED_DIRS: [&str; 4] = ["build", "target", "out", "node_modules"];

pub fn is_pruned_dir(name: &str) -> bool {
    PRUNED_DIRS.contains(&name)
}

/// Checks if a path is a Java source outside the pruned directories of `root`.
pub fn is_relevant_path(root: &Path, path: &Path) -> bool {
    let is_java = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext == "java")
        .unwrap_or(false);
    if !is_java {
        return false;
    }

    let relative = path.strip_prefix(root).unwrap_or(path);
    !relative
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .any(is_pruned_dir)
}
