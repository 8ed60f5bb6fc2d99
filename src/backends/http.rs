//! Blocking JSON requests with an on-disk response cache

use serde_json::Value;
use std::thread;
use std::time::Duration;

use crate::cache::store;
use crate::core::error::GeoError;
use crate::core::settings::Settings;

/// Minimum wait before retrying a throttled (429) or timed out (504) request
const RETRY_WAIT: Duration = Duration::from_secs(5);

/// A GET request returning JSON
#[derive(Debug, Clone)]
pub struct JsonRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,

    /// Sleep before hitting the network (not applied to cache hits)
    pub pause: Duration,

    /// Skip cached responses carrying a `remark` (Overpass errors/timeouts)
    pub check_remark: bool,
}

impl JsonRequest {
    pub fn new(url: impl Into<String>, params: Vec<(&'static str, String)>) -> Self {
        Self {
            url: url.into(),
            params,
            pause: Duration::ZERO,
            check_remark: false,
        }
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_check_remark(mut self) -> Self {
        self.check_remark = true;
        self
    }

    pub fn cache_key(&self) -> String {
        store::cache_key(&self.url, &self.params)
    }
}

/// Look the request up in the cache. `Ok(None)` on a miss or when caching is off.
pub fn cached_response(settings: &Settings, request: &JsonRequest) -> Result<Option<Value>, GeoError> {
    if !settings.use_cache {
        return Ok(None);
    }

    let path = store::cache_path(&settings.cache_folder, &request.cache_key());
    match store::load(&path)? {
        Some(response) if request.check_remark && has_remark(&response) => {
            tracing::debug!("ignoring cached response with remark: {:?}", path);
            Ok(None)
        }
        Some(response) => {
            tracing::debug!("retrieved response from cache file {:?}", path);
            Ok(Some(response))
        }
        None => Ok(None),
    }
}

fn has_remark(response: &Value) -> bool {
    response.get("remark").map_or(false, |remark| !remark.is_null())
}

fn save_response(settings: &Settings, request: &JsonRequest, response: &Value) -> Result<(), GeoError> {
    if !settings.use_cache {
        return Ok(());
    }
    let path = store::cache_path(&settings.cache_folder, &request.cache_key());
    store::save(&path, response)?;
    tracing::debug!("saved response to cache file {:?}", path);
    Ok(())
}

/// Fetch a JSON response, serving it from the cache when possible
pub fn fetch_json(settings: &Settings, request: &JsonRequest) -> Result<Value, GeoError> {
    if let Some(response) = cached_response(settings, request)? {
        return Ok(response);
    }

    let agent = ureq::AgentBuilder::new()
        .timeout(settings.requests_timeout)
        .user_agent(&settings.user_agent)
        .build();

    if !request.pause.is_zero() {
        tracing::debug!("pausing {:?} before HTTP request", request.pause);
        thread::sleep(request.pause);
    }

    let mut attempt = 0;
    loop {
        tracing::info!("GET {}", request.cache_key());

        let mut call = agent.get(&request.url).set("Referer", &settings.referer);
        for (key, value) in &request.params {
            call = call.query(key, value);
        }

        match call.call() {
            Ok(response) => {
                let value: Value =
                    serde_json::from_reader(response.into_reader()).map_err(|source| {
                        GeoError::Json {
                            origin: request.url.clone(),
                            source,
                        }
                    })?;
                save_response(settings, request, &value)?;
                return Ok(value);
            }
            Err(ureq::Error::Status(code @ (429 | 504), _)) if attempt < settings.max_retries => {
                attempt += 1;
                let wait = RETRY_WAIT.max(request.pause) * attempt;
                tracing::warn!(
                    "{} responded {code}; retry {attempt}/{} in {:?}",
                    request.url,
                    settings.max_retries,
                    wait
                );
                thread::sleep(wait);
            }
            Err(ureq::Error::Status(code, response)) => {
                return Err(GeoError::Http {
                    url: request.url.clone(),
                    message: format!("HTTP {} {}", code, response.status_text()),
                });
            }
            Err(err) => {
                return Err(GeoError::Http {
                    url: request.url.clone(),
                    message: err.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn request() -> JsonRequest {
        JsonRequest::new(
            "http://127.0.0.1:9/search",
            vec![("q", "somewhere".to_string())],
        )
    }

    fn seed(settings: &Settings, request: &JsonRequest, value: &Value) {
        let path = store::cache_path(&settings.cache_folder, &request.cache_key());
        store::save(&path, value).unwrap();
    }

    #[test]
    fn test_cache_hit_skips_network() {
        let temp = tempdir().unwrap();
        let settings = Settings::default().with_cache_folder(temp.path());
        let request = request();
        seed(&settings, &request, &json!([{"lat": "1", "lon": "2"}]));

        let response = fetch_json(&settings, &request).unwrap();
        assert_eq!(response, json!([{"lat": "1", "lon": "2"}]));
    }

    #[test]
    fn test_cache_disabled_ignores_cache() {
        let temp = tempdir().unwrap();
        let settings = Settings::default()
            .with_cache_folder(temp.path())
            .with_use_cache(false);
        let request = request();
        seed(&settings, &request, &json!([]));

        assert!(cached_response(&settings, &request).unwrap().is_none());
    }

    #[test]
    fn test_remark_responses_not_served() {
        let temp = tempdir().unwrap();
        let settings = Settings::default().with_cache_folder(temp.path());
        let plain = request();
        let checked = request().with_check_remark();
        seed(&settings, &plain, &json!({"elements": [], "remark": "runtime error"}));

        assert!(cached_response(&settings, &plain).unwrap().is_some());
        assert!(cached_response(&settings, &checked).unwrap().is_none());
    }

    #[test]
    fn test_cache_key_includes_params() {
        let a = JsonRequest::new("u", vec![("q", "a".to_string())]);
        let b = JsonRequest::new("u", vec![("q", "b".to_string())]);
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
