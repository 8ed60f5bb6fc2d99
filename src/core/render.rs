//! Renderer for cached response documents
//!
//! A document renders as a block: a `file_path` title line, one line per
//! scalar field, and a blank line after it. Nested objects and lists are
//! skipped.

use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

/// Width of the key column
pub const KEY_WIDTH: usize = 12;

/// Reduce a document to the object of interest (first element of a list)
pub fn normalize(document: &Value) -> Option<&Map<String, Value>> {
    match document {
        Value::Array(items) => items.first().and_then(Value::as_object),
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Render a scalar JSON value; `None` for objects and lists
pub fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn render_line(key: &str, value: &str) -> String {
    format!("{:<width$} {}\n", key, value, width = KEY_WIDTH)
}

/// Rendered view of one cached document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub title: String,
    pub contents: String,
}

impl Block {
    pub fn new(path: &Path, document: &Value) -> Self {
        let title = render_line("file_path", &path.display().to_string());

        let mut contents = String::new();
        if let Some(map) = normalize(document) {
            for (key, value) in map {
                if let Some(rendered) = render_scalar(value) {
                    contents.push_str(&render_line(key, &rendered));
                }
            }
        }

        Self { title, contents }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}", self.title, self.contents)
    }
}
