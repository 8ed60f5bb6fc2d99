//! Cache file enumeration
//!
//! Walks the cache root for `*.json` files, parses each one and yields the
//! documents accepted by a filter. The sequence is lazy; calling
//! [`CacheScanner::entries`] again restarts it from the top.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::core::paths::is_json_file;

/// Predicate applied to each parsed document before it is yielded
pub type DocumentFilter = fn(&Value) -> bool;

/// A JSON value is empty when it is falsy: null, false, 0, "", [] or {}
pub fn is_empty_document(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Default filter: skip empty documents
pub fn non_empty(document: &Value) -> bool {
    !is_empty_document(document)
}

pub fn only_empty(document: &Value) -> bool {
    is_empty_document(document)
}

pub fn accept_all(_: &Value) -> bool {
    true
}

/// Drop leading `.` components so walked paths print as `.nomad/...`, not `./.nomad/...`
fn strip_cur_dir(root: &Path) -> PathBuf {
    let stripped: PathBuf = root
        .components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect();
    if stripped.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        stripped
    }
}

/// A parsed cache file
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub document: Value,
}

/// Enumerates cached response files under a root directory
#[derive(Debug, Clone)]
pub struct CacheScanner {
    root: PathBuf,
    filter: DocumentFilter,
}

impl CacheScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: strip_cur_dir(root.as_ref()),
            filter: non_empty,
        }
    }

    pub fn with_filter(mut self, filter: DocumentFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield every accepted cache file.
    ///
    /// Unreadable directory entries are skipped (a missing root yields
    /// nothing); a file that cannot be read or parsed yields an error.
    pub fn entries(&self) -> impl Iterator<Item = Result<CacheEntry>> + '_ {
        let filter = self.filter;

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::debug!("skipping cache entry: {err}");
                    None
                }
            })
            .filter(|entry| entry.path().is_file() && is_json_file(entry.path()))
            .filter_map(move |entry| match read_document(entry.path()) {
                Ok(document) if filter(&document) => Some(Ok(CacheEntry {
                    path: entry.into_path(),
                    document,
                })),
                Ok(_) => None,
                Err(err) => Some(Err(err)),
            })
    }
}

/// Read and parse a single cache file
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cache file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse cache file: {:?}", path))
}
