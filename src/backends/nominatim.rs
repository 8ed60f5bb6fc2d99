//! Nominatim geocoding
//!
//! Two lookups are supported: a point geocode (first result's lat/lon) and a
//! place lookup that also returns the boundary geometry type and bounding box
//! used to drive network downloads.

use serde::Deserialize;
use serde_json::Value;

use crate::backends::http::{fetch_json, JsonRequest};
use crate::core::error::GeoError;
use crate::core::settings::Settings;

/// Bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
}

/// A Nominatim search result
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub display_name: String,

    #[serde(default)]
    pub osm_type: Option<String>,

    #[serde(default)]
    pub osm_id: Option<u64>,

    /// `[south, north, west, east]` as decimal strings
    #[serde(default)]
    pub boundingbox: Vec<String>,

    #[serde(default)]
    pub geojson: Option<Geometry>,
}

impl Place {
    pub fn is_polygonal(&self) -> bool {
        matches!(
            self.geojson.as_ref().map(|g| g.kind.as_str()),
            Some("Polygon") | Some("MultiPolygon")
        )
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let coords: Vec<f64> = self
            .boundingbox
            .iter()
            .map(|c| c.parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;

        match coords.as_slice() {
            [south, north, west, east] => Some(BoundingBox {
                south: *south,
                north: *north,
                west: *west,
                east: *east,
            }),
            _ => None,
        }
    }
}

/// Request for a point geocode
pub fn geocode_request(settings: &Settings, query: &str) -> JsonRequest {
    search_request(
        settings,
        vec![
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
            ("dedupe", "0".to_string()),
            ("q", query.to_string()),
        ],
    )
}

/// Request for a place lookup with boundary geometry
pub fn place_request(settings: &Settings, query: &str) -> JsonRequest {
    search_request(
        settings,
        vec![
            ("format", "json".to_string()),
            ("polygon_geojson", "1".to_string()),
            ("limit", "50".to_string()),
            ("dedupe", "0".to_string()),
            ("q", query.to_string()),
        ],
    )
}

fn search_request(settings: &Settings, params: Vec<(&'static str, String)>) -> JsonRequest {
    JsonRequest::new(settings.nominatim_endpoint("search"), params).with_pause(settings.nominatim_pause)
}

fn parse_coordinate(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Extract `(lat, lon)` from a point geocode response
pub fn coordinates(query: &str, response: &Value) -> Result<(f64, f64), GeoError> {
    if let Some([result]) = response.as_array().map(Vec::as_slice) {
        let lat = parse_coordinate(result.get("lat"));
        let lon = parse_coordinate(result.get("lon"));
        if let (Some(lat), Some(lon)) = (lat, lon) {
            return Ok((lat, lon));
        }
    }

    Err(GeoError::insufficient(format!(
        "Nominatim could not geocode query '{}'.",
        query
    )))
}

/// Geocode a query to a `(lat, lon)` pair
pub fn geocode(settings: &Settings, query: &str) -> Result<(f64, f64), GeoError> {
    let response = fetch_json(settings, &geocode_request(settings, query))?;
    coordinates(query, &response)
}

/// Pick the first polygonal result with a usable bounding box
pub fn select_place(query: &str, response: Value) -> Result<Place, GeoError> {
    let results: Vec<Place> = serde_json::from_value(response).map_err(|source| GeoError::Json {
        origin: "Nominatim search response".to_string(),
        source,
    })?;

    if results.is_empty() {
        return Err(GeoError::insufficient(format!(
            "Nominatim geocoder returned 0 results for query '{}'.",
            query
        )));
    }

    results
        .into_iter()
        .find(|place| place.is_polygonal() && place.bounding_box().is_some())
        .ok_or_else(|| {
            GeoError::insufficient(format!(
                "Nominatim did not geocode query '{}' to a geometry of type (Multi)Polygon.",
                query
            ))
        })
}

/// Resolve a place name to its boundary
pub fn geocode_place(settings: &Settings, query: &str) -> Result<Place, GeoError> {
    let response = fetch_json(settings, &place_request(settings, query))?;
    let place = select_place(query, response)?;
    tracing::debug!(
        "resolved {query:?} to {} ({:?} {:?})",
        place.display_name,
        place.osm_type,
        place.osm_id
    );
    Ok(place)
}
