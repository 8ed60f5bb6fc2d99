//! Settings for the geocoding and download backends
//!
//! Settings are an explicit value built once per invocation from the CLI
//! flags and passed by reference into every backend call.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::paths::DEFAULT_CACHE_DIR;

/// Default Nominatim API base URL
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default Overpass API base URL
pub const OVERPASS_URL: &str = "https://overpass-api.de/api";

/// Overpass way filter for the "all" network type (every non-abandoned highway)
pub const NETWORK_FILTER_ALL: &str = r#"["highway"]["area"!~"yes"]["highway"!~"abandoned|construction|no|planned|platform|proposed|raceway|razed"]["service"!~"private"]"#;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding cached JSON responses
    pub cache_folder: PathBuf,

    /// Serve and store responses through the cache
    pub use_cache: bool,

    /// Stop with a cache-only interrupt once data has been cached
    pub cache_only_mode: bool,

    pub nominatim_url: String,
    pub overpass_url: String,

    /// Sent as the `User-Agent` header
    pub user_agent: String,

    /// Sent as the `Referer` header
    pub referer: String,

    /// Per-request timeout (also used as the Overpass server timeout)
    pub requests_timeout: Duration,

    /// Pause before each uncached Nominatim request (usage policy: 1 req/s)
    pub nominatim_pause: Duration,

    /// Retries for 429/504 responses
    pub max_retries: u32,

    /// Overpass way filter used for network downloads
    pub network_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_folder: PathBuf::from(DEFAULT_CACHE_DIR),
            use_cache: true,
            cache_only_mode: false,
            nominatim_url: NOMINATIM_URL.to_string(),
            overpass_url: OVERPASS_URL.to_string(),
            user_agent: format!("nomad/{}", env!("CARGO_PKG_VERSION")),
            referer: format!("nomad/{}", env!("CARGO_PKG_VERSION")),
            requests_timeout: Duration::from_secs(180),
            nominatim_pause: Duration::from_secs(1),
            max_retries: 3,
            network_filter: NETWORK_FILTER_ALL.to_string(),
        }
    }
}

impl Settings {
    pub fn with_cache_folder(mut self, cache_folder: impl AsRef<Path>) -> Self {
        self.cache_folder = cache_folder.as_ref().to_path_buf();
        self
    }

    pub fn with_use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn with_cache_only_mode(mut self, cache_only_mode: bool) -> Self {
        self.cache_only_mode = cache_only_mode;
        self
    }

    /// Endpoint URL under the Nominatim base
    pub fn nominatim_endpoint(&self, endpoint: &str) -> String {
        format!("{}/{}", self.nominatim_url.trim_end_matches('/'), endpoint)
    }

    /// Endpoint URL under the Overpass base
    pub fn overpass_endpoint(&self, endpoint: &str) -> String {
        format!("{}/{}", self.overpass_url.trim_end_matches('/'), endpoint)
    }
}
