//! Command-line arguments for the `sun-path` binary.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use sun_path::Observation;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude,
          default_value_t = Observation::default().position.latitude, env = "SUN_PATH_LATITUDE")]
    pub latitude: f64,
    /// Observer longitude in decimal degrees (-180 to 180)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude,
          default_value_t = Observation::default().position.longitude, env = "SUN_PATH_LONGITUDE")]
    pub longitude: f64,
    /// Calendar date (YYYY-MM-DD); defaults to today in the chosen time zone
    #[arg(long, value_parser = parse_date, env = "SUN_PATH_DATE")]
    pub date: Option<NaiveDate>,
    /// Time zone of the local day ("system", "utc", an IANA name, or a fixed offset like "+02:00")
    #[arg(long, default_value = "system", env = "SUN_PATH_TIMEZONE")]
    pub timezone: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Also print the per-minute sun path
    #[arg(long)]
    pub table: bool,
    /// Table step in minutes
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1440))]
    pub every: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

fn parse_coordinate(s: &str) -> Result<f64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("Wrong coordinate format '{}' [use format XX.XXXX]", s))
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v = parse_coordinate(s)?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v = parse_coordinate(s)?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}' (use YYYY-MM-DD): {}", s, e))
}
