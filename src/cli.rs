//! Command-Line Interface Module
//!
//! Argument parsing and validation. Every flag has a default reproducing the
//! reference deployment (Oslo, current year, `solgraf.png` in the working
//! directory), so a bare invocation regenerates the usual chart.

use clap::Parser;
use std::path::PathBuf;

// ===================== CLI =====================

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Location display name used in the chart title
    #[arg(long, default_value = "Oslo", env = "SOLGRAF_NAME")]
    pub name: String,

    /// Region or country the location belongs to
    #[arg(long, default_value = "Norway", env = "SOLGRAF_REGION")]
    pub region: String,

    /// Time zone: an IANA identifier, "system", or "location"
    /// (derived from the coordinates)
    #[arg(long, default_value = "Europe/Oslo", env = "SOLGRAF_TIMEZONE")]
    pub timezone: String,

    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(long, default_value_t = 59.91, allow_hyphen_values = true, value_parser = parse_latitude, env = "SOLGRAF_LATITUDE")]
    pub latitude: f64,

    /// Observer longitude in decimal degrees (-180 to 180)
    #[arg(long, default_value_t = 10.75, allow_hyphen_values = true, value_parser = parse_longitude, env = "SOLGRAF_LONGITUDE")]
    pub longitude: f64,

    /// Target year; defaults to the current year in the target time zone
    #[arg(long, value_parser = parse_year, env = "SOLGRAF_YEAR")]
    pub year: Option<i32>,

    /// Date treated as "today" for the caption and marker
    /// (e.g., "2025-12-24" or "today"); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Output image path, overwritten on every run
    #[arg(long, default_value = "solgraf.png", env = "SOLGRAF_OUTPUT")]
    pub output: PathBuf,

    // ===================== CHART OPTIONS =====================
    /// Figure width in pixels
    #[arg(long, default_value_t = 1200, value_parser = parse_dimension)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 700, value_parser = parse_dimension)]
    pub height: u32,

    /// Title font size in points
    #[arg(long, default_value_t = 28.0, value_parser = parse_font_size)]
    pub title_size: f64,

    /// Caption font size in points
    #[arg(long, default_value_t = 17.0, value_parser = parse_font_size)]
    pub caption_size: f64,

    /// Hours between horizontal gridlines (must divide 24)
    #[arg(long, default_value_t = 2, value_parser = parse_tick_hours)]
    pub tick_hours: u32,
}

// ===================== CLI VALUE PARSERS =====================

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-90.0..=90.0).contains(&v) {
        return Err(format!("Latitude must be between -90 and 90, got {}", v));
    }
    Ok(v)
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(-180.0..=180.0).contains(&v) {
        return Err(format!("Longitude must be between -180 and 180, got {}", v));
    }
    Ok(v)
}

fn parse_year(s: &str) -> Result<i32, String> {
    let v: i32 = s.parse().map_err(|_| format!("Invalid integer: {}", s))?;
    // Stay inside the window where timezone rules and the ΔT estimate are
    // both meaningful
    if !(1800..=2500).contains(&v) {
        return Err(format!("Year must be between 1800 and 2500, got {}", v));
    }
    Ok(v)
}

fn parse_dimension(s: &str) -> Result<u32, String> {
    let v: u32 = s.parse().map_err(|_| format!("Invalid integer: {}", s))?;
    if !(200..=8000).contains(&v) {
        return Err(format!("Dimension must be between 200 and 8000 pixels, got {}", v));
    }
    Ok(v)
}

fn parse_font_size(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("Invalid number: {}", s))?;
    if !(6.0..=96.0).contains(&v) {
        return Err(format!("Font size must be between 6 and 96 points, got {}", v));
    }
    Ok(v)
}

fn parse_tick_hours(s: &str) -> Result<u32, String> {
    let v: u32 = s.parse().map_err(|_| format!("Invalid integer: {}", s))?;
    if v == 0 || 24 % v != 0 {
        return Err(format!("Tick spacing must divide 24 hours, got {}", v));
    }
    Ok(v)
}

// ===================== TESTS =====================
