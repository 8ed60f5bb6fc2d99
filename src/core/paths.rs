//! Path helpers for the response cache

use std::path::{Path, PathBuf};

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "./.nomad/osmnx/cache";

/// Extension of cached response files
pub const CACHE_EXTENSION: &str = "json";

/// Check whether a path names a cached response file (`*.json`)
pub fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == CACHE_EXTENSION)
        .unwrap_or(false)
}

/// Path of the cache file for a given key digest
pub fn cache_file(cache_folder: &Path, digest: &str) -> PathBuf {
    cache_folder.join(format!("{}.{}", digest, CACHE_EXTENSION))
}
