//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cache::remove::{RemoveOptions, RemoveScope};
use crate::core::paths::DEFAULT_CACHE_DIR;
use crate::core::settings::Settings;

/// nomad - geocode places, download GIS data and manage the response cache.
#[derive(Parser, Debug)]
#[command(name = "nomad")]
#[command(
    author,
    version,
    about,
    arg_required_else_help = true,
    long_about = r#"nomad geocodes place names through Nominatim, downloads OpenStreetMap
street networks through Overpass, and manages the JSON responses cached on disk.

Responses are cached under ./.nomad/osmnx/cache by default.

Examples:
    nomad geocode "Berlin, Germany"
    nomad geocode --pretty-print --cache "Paris, France"
    nomad download --download-dir ./data "Mitte, Berlin"
    nomad cache inspect
    nomad cache search "deutschland"
    nomad cache rm --empty --force
"#
)]
pub struct Cli {
    /// Simulates running commands.
    #[arg(
        short = 'n',
        long,
        global = true,
        long_help = "Simulate running commands. geocode echoes LOCATION, download reports\n\
the target directory, and cache rm lists the files it would delete.\n\n\
No network requests are made and nothing is deleted."
    )]
    pub dry_run: bool,

    /// Turn on debugging features.
    #[arg(
        short = 'e',
        long,
        long_help = "Turn on debug logging on stderr (requests, cache hits and writes).\n\n\
RUST_LOG takes precedence when set."
    )]
    pub debug: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert location string into latitude/longitude pair.
    #[command(
        arg_required_else_help = true,
        long_about = "Geocode LOCATION with Nominatim and print \"LAT LON\".\n\n\
Examples:\n\
  nomad geocode \"Berlin, Germany\"\n\
  nomad geocode -p -c \"Paris, France\"\n"
    )]
    Geocode {
        /// Cache geocode JSON response.
        #[arg(short, long)]
        cache: bool,

        /// Toggle pretty printing.
        #[arg(short, long)]
        pretty_print: bool,

        /// Place name or address to geocode.
        #[arg(value_name = "LOCATION")]
        location: String,
    },

    /// Download GIS data from various sources.
    #[command(
        arg_required_else_help = true,
        long_about = "Resolve LOCATION to its boundary with Nominatim and download the street\n\
network inside it from Overpass into DIR.\n\n\
The download runs in cache-only mode: responses are written to DIR and\n\
nothing else is built from them.\n\n\
Example:\n\
  nomad download -d ./data \"Mitte, Berlin\"\n"
    )]
    Download {
        /// Path to GIS download directory.
        #[arg(
            short,
            long,
            value_name = "DIR",
            default_value = DEFAULT_CACHE_DIR
        )]
        download_dir: PathBuf,

        /// Place name to download.
        #[arg(value_name = "LOCATION")]
        location: String,
    },

    /// Manage GIS data cache.
    #[command(arg_required_else_help = true)]
    Cache {
        /// Cache directory to operate on.
        #[arg(long, value_name = "DIR", default_value = DEFAULT_CACHE_DIR)]
        cache_dir: PathBuf,

        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Inspect the contents of the GIS data cache directory.
    #[command(
        long_about = "Print one block per non-empty cached JSON file: its path followed by\n\
every scalar field (nested objects and lists are skipped)."
    )]
    Inspect,

    /// Search through JSON data in GIS data cache directory.
    #[command(
        arg_required_else_help = true,
        long_about = "Print the blocks whose scalar fields match QUERY, a case-insensitive\n\
regular expression. The file path itself is not searched.\n\n\
Example:\n\
  nomad cache search \"berlin|paris\"\n"
    )]
    Search {
        /// Regular expression to match.
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Remove select cached data from cache directory.
    Rm {
        /// Toggle remove empty cache.
        #[arg(short, long)]
        empty: bool,

        /// Toggle no prompt before deleting.
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    crate::core::logging::init(cli.debug);

    if cli.no_color {
        colored::control::set_override(false);
    }

    tracing::debug!("dry_run={} debug={}", cli.dry_run, cli.debug);

    match cli.command {
        Commands::Geocode {
            cache,
            pretty_print,
            location,
        } => {
            let settings = Settings::default().with_use_cache(cache);
            crate::backends::geocode::run_geocode(&settings, &location, pretty_print, cli.dry_run)
        }

        Commands::Download {
            download_dir,
            location,
        } => {
            let settings = Settings::default()
                .with_cache_folder(&download_dir)
                .with_use_cache(true)
                .with_cache_only_mode(true);
            crate::backends::download::run_download(&settings, &location, cli.dry_run)
        }

        Commands::Cache { cache_dir, action } => match action {
            CacheCommands::Inspect => crate::cache::inspect::run_inspect(&cache_dir),
            CacheCommands::Search { query } => crate::cache::search::run_search(&cache_dir, &query),
            CacheCommands::Rm { empty, force } => crate::cache::remove::run_remove(
                &cache_dir,
                RemoveOptions {
                    scope: RemoveScope::from_empty_flag(empty),
                    force,
                    dry_run: cli.dry_run,
                },
            ),
        },
    }
}
