use clap::Parser;
use geopin_core::models::Mode;
use std::path::PathBuf;

/// GeoPin - Interactive map client for places
#[derive(Parser, Debug)]
#[command(name = "geopin")]
#[command(about = "Register places and run nearby, nearest and distance queries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output events in JSON format
    #[arg(long)]
    pub json: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the place service (e.g., "https://gis.example.com/api")
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Use an in-memory place service instead of the remote one
    #[arg(long)]
    pub offline: bool,

    /// Mode to start in
    #[arg(long, default_value = "add")]
    pub mode: ModeArg,

    /// Unit of the radius input (meters, kilometers, miles, or feet)
    #[arg(long, value_name = "UNIT")]
    pub radius_unit: Option<String>,

    /// Request timeout in seconds (defaults to the transport default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Mode selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Register a new place
    Add,
    /// Find places within a radius
    Nearby,
    /// Find the nearest place
    Nearest,
    /// Measure the distance between two points
    Distance,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Add => Mode::Add,
            ModeArg::Nearby => Mode::Nearby,
            ModeArg::Nearest => Mode::Nearest,
            ModeArg::Distance => Mode::Distance,
        }
    }
}
