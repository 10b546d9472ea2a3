// Cache path utilities.
// Resolves where the store files and the log file live on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/pagestat on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pagestat").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the log file written by the tracing subscriber.
pub fn log_path(base: &Path) -> PathBuf {
    base.join("pagestat.log")
}

/// Directory holding one file per stored key.
pub fn store_dir(base: &Path) -> PathBuf {
    base.join("store")
}

/// Path to the file backing a single key.
pub fn key_path(base: &Path, key: &str) -> PathBuf {
    store_dir(base).join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect()
}
