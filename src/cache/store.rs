//! Response store - read/write cached JSON responses
//!
//! Each response lives at `<cache_folder>/<sha1(key)>.json`, where the key
//! is the request URL with its query parameters.

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::GeoError;
use crate::core::paths::cache_file;
use crate::core::util::sha1_hex;

/// Build the cache key for a request
pub fn cache_key(url: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    format!("{}?{}", url, query.join("&"))
}

/// Cache file path for a key
pub fn cache_path(cache_folder: &Path, key: &str) -> PathBuf {
    cache_file(cache_folder, &sha1_hex(key.as_bytes()))
}

/// Load a cached response; `Ok(None)` when nothing is cached yet
pub fn load(path: &Path) -> Result<Option<Value>, GeoError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(GeoError::CacheIo {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| GeoError::Json {
            origin: path.display().to_string(),
            source,
        })
}

/// Save a response, creating the cache folder when needed
pub fn save(path: &Path, response: &Value) -> Result<(), GeoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GeoError::CacheIo {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string(response).map_err(|source| GeoError::Json {
        origin: path.display().to_string(),
        source,
    })?;

    fs::write(path, json).map_err(|source| GeoError::CacheIo {
        path: path.to_path_buf(),
        source,
    })
}
