//! Download command

use anyhow::Result;
use std::path::Path;

use crate::backends::{nominatim, overpass};
use crate::core::error::GeoError;
use crate::core::settings::Settings;

fn not_found(location: &str) -> anyhow::Error {
    anyhow::anyhow!("Location '{}' could not be found.", location)
}

/// Resolve `location` and cache its street network.
///
/// Returns the resolved place once the data is in the cache.
pub fn download(settings: &Settings, location: &str) -> Result<nominatim::Place> {
    let place = match nominatim::geocode_place(settings, location) {
        Ok(place) => place,
        Err(GeoError::InsufficientResponse(message)) => {
            tracing::debug!("{message}");
            return Err(not_found(location));
        }
        Err(err) => return Err(err.into()),
    };

    match overpass::download_network(settings, &place) {
        Ok(_) | Err(GeoError::CacheOnlyInterrupt) => Ok(place),
        Err(GeoError::InsufficientResponse(message)) => {
            tracing::debug!("{message}");
            Err(not_found(location))
        }
        Err(err) => Err(err.into()),
    }
}

pub fn success_message(location: &str, place: &nominatim::Place, download_dir: &Path) -> String {
    format!(
        "Location {} ({}) successfully downloaded to: {}.",
        location,
        place.display_name,
        download_dir.display()
    )
}

/// Run the download command
pub fn run_download(settings: &Settings, location: &str, dry_run: bool) -> Result<()> {
    let download_dir = settings.cache_folder.as_path();

    if dry_run {
        println!(
            "Location {} would be downloaded to: {}.",
            location,
            download_dir.display()
        );
        return Ok(());
    }

    let place = download(settings, location)?;
    println!("{}", success_message(location, &place, download_dir));
    Ok(())
}
