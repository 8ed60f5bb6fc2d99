//! Overpass network download

use serde_json::Value;

use crate::backends::http::{fetch_json, JsonRequest};
use crate::backends::nominatim::{BoundingBox, Place};
use crate::core::error::GeoError;
use crate::core::settings::Settings;

/// Overpass QL query for all ways matching `filter` inside `bbox`, plus their nodes
pub fn network_query(bbox: &BoundingBox, filter: &str, timeout_secs: u64) -> String {
    format!(
        "[out:json][timeout:{}];(way{}({},{},{},{});>;);out;",
        timeout_secs, filter, bbox.south, bbox.west, bbox.north, bbox.east
    )
}

pub fn network_request(settings: &Settings, place: &Place) -> Result<JsonRequest, GeoError> {
    let bbox = place.bounding_box().ok_or_else(|| {
        GeoError::insufficient(format!("{} has no usable bounding box.", place.display_name))
    })?;
    let query = network_query(
        &bbox,
        &settings.network_filter,
        settings.requests_timeout.as_secs(),
    );

    Ok(JsonRequest::new(settings.overpass_endpoint("interpreter"), vec![("data", query)])
        .with_check_remark())
}

/// Number of OSM elements in a response
pub fn element_count(response: &Value) -> usize {
    response
        .get("elements")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

/// Download the street network within a place's bounding box.
///
/// In cache-only mode the response is cached and a
/// [`GeoError::CacheOnlyInterrupt`] is returned instead of the data.
pub fn download_network(settings: &Settings, place: &Place) -> Result<Value, GeoError> {
    let request = network_request(settings, place)?;
    let response = fetch_json(settings, &request)?;

    if let Some(remark) = response.get("remark").and_then(Value::as_str) {
        tracing::warn!("Overpass remark for {}: {}", place.display_name, remark);
    }
    tracing::debug!(
        "downloaded {} elements for {}",
        element_count(&response),
        place.display_name
    );

    if settings.cache_only_mode {
        return Err(GeoError::CacheOnlyInterrupt);
    }
    Ok(response)
}
