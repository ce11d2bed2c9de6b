use chrono::{Datelike, Utc};
use chrono_english::{Dialect, parse_date_string};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod chart;
mod cli;
mod error;
mod frames;
mod location;
mod output;
mod series;
mod solar;
mod time;

use chart::ChartConfig;
use cli::Args;
use frames::TimeZoneProjector;
use location::Location;
use output::TodayAnnotator;
use series::YearSeriesBuilder;
use solar::SunEventCalculator;
use time::select_timezone;

// ===================== MAIN =====================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries only the final diagnostic line
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // An unknown timezone identifier must fail here, before any computation
    let tz = select_timezone(&args.timezone, args.longitude, args.latitude)?;
    let location = Location::new(&args.name, &args.region, tz.name(), args.latitude, args.longitude);

    // Anchor "today" to the target timezone
    let now = Utc::now().with_timezone(&tz);
    let today = match &args.date {
        Some(s) => parse_date_string(s, now, Dialect::Us)?.date_naive(),
        None => now.date_naive(),
    };
    let year = args.year.unwrap_or_else(|| today.year());

    let calculator = SunEventCalculator::new(&location);
    let projector = TimeZoneProjector::new(location.timezone()?);

    info!(
        location = %location.name,
        region = %location.region,
        timezone = %location.timezone_id,
        year,
        "computing sun event series"
    );
    let series = YearSeriesBuilder::new(calculator, projector).build(year)?;
    info!(records = series.len(), "series assembled");

    let caption = TodayAnnotator::new(calculator, projector).annotate(today)?;

    let config = ChartConfig {
        output: args.output.clone(),
        width: args.width,
        height: args.height,
        title_size: args.title_size,
        caption_size: args.caption_size,
        tick_hours: args.tick_hours,
    };
    chart::render(&series, &caption, caption.date, &location, year, &config)?;
    info!(path = %args.output.display(), "chart written");

    println!("Graf lagret med info: {}", caption.rendered);
    Ok(())
}
