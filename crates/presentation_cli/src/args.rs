//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use domain::{CloudCoverRange, ForecastDays};

/// Forecast report CLI
#[derive(Debug, Parser)]
#[command(name = "forecast-report")]
#[command(author, version, about = "Weather forecast report builder", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Workbook document to operate on
    #[arg(short, long, global = true)]
    pub document: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up place names
    ///
    /// Without a query, reads search text line by line from stdin and shows
    /// suggestions as they arrive.
    Search {
        /// Place name to look up
        query: Option<String>,

        /// Print only the N-th suggestion (1-based)
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Fetch a forecast and write the report table
    ///
    /// Example: forecast-report generate --location Mannheim --start 2024-01-05 --days 5
    Generate(GenerateArgs),

    /// Filter the report table
    Filter(FilterArgs),

    /// List the condition options of the current report
    Conditions,

    /// Export the document to an .xlsx file
    Export {
        /// Output path
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("place").required(true).args(["location", "lat"])))]
pub struct GenerateArgs {
    /// Place name, resolved through the geocoder
    #[arg(short, long)]
    pub location: Option<String>,

    /// Suggestion to use when the place name is ambiguous (1-based)
    #[arg(long, default_value_t = 1, requires = "location")]
    pub pick: usize,

    /// Latitude, skips geocoding
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Title used with explicit coordinates
    #[arg(long, requires = "lat")]
    pub label: Option<String>,

    /// First forecast day, YYYY-MM-DD (default: today)
    #[arg(short, long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Days after the start date to include (1-5)
    #[arg(long, default_value_t = ForecastDays::MIN, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub days: u8,

    /// Also export the report to this .xlsx file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["condition", "cloud_cover", "reset"])
))]
pub struct FilterArgs {
    /// Condition option, by key or text ("Show All" or 0 clears it)
    #[arg(long)]
    pub condition: Option<String>,

    /// Cloud cover range in percent, e.g. 20-80
    #[arg(long, value_parser = parse_cloud_cover)]
    pub cloud_cover: Option<CloudCoverRange>,

    /// Remove every filter
    #[arg(long, conflicts_with_all = ["condition", "cloud_cover"])]
    pub reset: bool,
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{value}': {e}"))
}

/// Parse `LOW-HIGH`, snapping both ends to the slider step
pub fn parse_cloud_cover(value: &str) -> Result<CloudCoverRange, String> {
    let (low, high) = value
        .split_once('-')
        .ok_or_else(|| format!("expected LOW-HIGH, got '{value}'"))?;
    let low: u8 = low.trim().parse().map_err(|e| format!("invalid low bound: {e}"))?;
    let high: u8 = high.trim().parse().map_err(|e| format!("invalid high bound: {e}"))?;
    CloudCoverRange::snapped(low, high).map_err(|e| e.to_string())
}
