//! Geocode command

use anyhow::{bail, Result};

use crate::backends::nominatim;
use crate::core::error::GeoError;
use crate::core::settings::Settings;

/// Format a coordinate pair as `"lat lon"`, or as an aligned two-line block
pub fn format_coordinates((lat, lon): (f64, f64), pretty_print: bool) -> String {
    if pretty_print {
        format!(
            "{:<10}{:>14.8}\n{:<10}{:>14.8}",
            "latitude:", lat, "longitude:", lon
        )
    } else {
        format!("{:?} {:?}", lat, lon)
    }
}

/// Geocode `location`, or echo it back unchanged in dry-run mode
pub fn geocode_location(
    settings: &Settings,
    location: &str,
    pretty_print: bool,
    dry_run: bool,
) -> Result<String> {
    if dry_run {
        return Ok(location.to_string());
    }

    match nominatim::geocode(settings, location) {
        Ok(coordinates) => Ok(format_coordinates(coordinates, pretty_print)),
        Err(GeoError::InsufficientResponse(message)) => bail!(message),
        Err(err) => Err(err.into()),
    }
}

/// Run the geocode command
pub fn run_geocode(
    settings: &Settings,
    location: &str,
    pretty_print: bool,
    dry_run: bool,
) -> Result<()> {
    let result = geocode_location(settings, location, pretty_print, dry_run)?;
    println!("{}", result);
    Ok(())
}
