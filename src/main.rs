//! nomad - geocoding and GIS cache management from the command line
//!
//! nomad provides:
//! - Geocoding of place names through Nominatim
//! - Street network downloads through Overpass into a local cache
//! - Inspection, search and removal of cached JSON responses

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

mod backends;
mod cache;
mod cli;
mod core;

fn main() -> Result<()> {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        // a bare command prints its usage and succeeds
        Err(err) if err.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            print!("{}", err.render());
            return Ok(());
        }
        Err(err) => err.exit(),
    };

    cli::run(cli)
}
