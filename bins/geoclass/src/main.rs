//! geoclass: distances, bearings and DMS conversion from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use geoclass_geo::{error_label, Language, DEFAULT_BARYCENTER_NAME};
use geoclass_sources::{DEFAULT_MAX_HITS, DEFAULT_MAX_RADIUS};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use config::Config;

/// Geodesic calculations for named locations
#[derive(Parser)]
#[command(name = "geoclass")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./geoclass.toml, ./.geoclass.toml, ./.config/geoclass.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Distance unit (km, mi, in, sm, ft, yd)
    #[arg(short, long, global = true)]
    unit: Option<String>,

    /// Output language (en, de)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// Direction names (short, long)
    #[arg(long, global = true)]
    form: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    Distance {
        #[command(flatten)]
        route: Route,
    },

    /// Compass direction from the first point to the second
    Bearing {
        #[command(flatten)]
        route: Route,
    },

    /// Convert a DMS angle such as "51° 24' 32.123'' W" to decimal degrees
    ToDeg {
        /// Angle text
        #[arg(allow_hyphen_values = true)]
        dms: String,
    },

    /// Convert decimal degrees to degrees, minutes and seconds
    ToDms {
        /// Angle in decimal degrees
        #[arg(allow_negative_numbers = true)]
        degrees: f64,

        /// Prefix the hemisphere letter for this axis
        #[arg(short, long, value_enum)]
        axis: Option<Axis>,

        /// Fractional digits of the seconds
        #[arg(short, long)]
        places: Option<u32>,
    },

    /// Mean position of the points in a JSON file
    Barycenter {
        /// JSON array of {"name", "latitude", "longitude"} objects
        file: PathBuf,

        /// Name of the resulting point
        #[arg(short, long, default_value = DEFAULT_BARYCENTER_NAME)]
        name: String,
    },

    /// Points of an RDF document near a location
    Near {
        /// RDF/XML file with geo:Point entries
        file: PathBuf,

        /// Latitude of the location (decimal or DMS)
        #[arg(allow_hyphen_values = true)]
        latitude: String,

        /// Longitude of the location (decimal or DMS)
        #[arg(allow_hyphen_values = true)]
        longitude: String,

        /// Search radius in the selected unit
        #[arg(short, long, default_value_t = DEFAULT_MAX_RADIUS)]
        radius: f64,

        /// Maximum number of results (0 for all)
        #[arg(long, default_value_t = DEFAULT_MAX_HITS)]
        hits: usize,

        /// Name of the location
        #[arg(short, long, default_value = "origin")]
        name: String,
    },
}

/// Two points given as latitude/longitude text (decimal or DMS)
#[derive(clap::Args)]
struct Route {
    #[arg(allow_hyphen_values = true)]
    from_latitude: String,
    #[arg(allow_hyphen_values = true)]
    from_longitude: String,
    #[arg(allow_hyphen_values = true)]
    to_latitude: String,
    #[arg(allow_hyphen_values = true)]
    to_longitude: String,

    /// Name of the first point
    #[arg(long, default_value = "A")]
    from_name: String,

    /// Name of the second point
    #[arg(long, default_value = "B")]
    to_name: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    Lat,
    Lon,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let fallback_language = Language::from_code(cli.lang.as_deref().unwrap_or_default());

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let label = format!("{}:", error_label(fallback_language));
            eprintln!("{} {:#}", label.red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let telemetry = config.schema.telemetry.clone().with_verbosity(cli.verbose);
    if let Err(e) = geoclass_telemetry::init_with_config(telemetry) {
        eprintln!("{e}");
    }
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let settings = config.settings(cli.unit.as_deref(), cli.lang.as_deref(), cli.form.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Distance { route } => commands::distance(&route, settings, json),
        Commands::Bearing { route } => commands::bearing(&route, settings, json),
        Commands::ToDeg { dms } => commands::to_degrees(&dms, settings, json),
        Commands::ToDms { degrees, axis, places } => commands::to_dms(degrees, axis, places, settings, json),
        Commands::Barycenter { file, name } => commands::barycenter(&file, &name, settings, json),
        Commands::Near {
            file,
            latitude,
            longitude,
            radius,
            hits,
            name,
        } => commands::near(&file, &name, &latitude, &longitude, radius, hits, settings, json),
    }
}
