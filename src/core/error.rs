//! Errors raised by the geocoding and download backends

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    /// The service answered, but not with anything usable for the query
    #[error("{0}")]
    InsufficientResponse(String),

    /// Data was cached and `cache_only_mode` asked us to stop there
    #[error("Interrupted because `cache_only_mode` is enabled.")]
    CacheOnlyInterrupt,

    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("cache file {path:?}: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GeoError {
    pub fn insufficient(message: impl Into<String>) -> Self {
        GeoError::InsufficientResponse(message.into())
    }
}
