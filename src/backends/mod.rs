//! Backends module - Geocoding services and the commands built on them
//!
//! Provides:
//! - http: Blocking JSON requests through the response cache
//! - nominatim: Point and place geocoding
//! - overpass: Street network downloads
//! - geocode: The geocode command
//! - download: The download command

pub mod download;
pub mod geocode;
pub mod http;
pub mod nominatim;
pub mod overpass;
