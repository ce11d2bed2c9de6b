//! Time and Timezone Utilities Module
//!
//! Decimal-hour conversion for the chart's vertical axis and timezone
//! resolution helpers backing the `--timezone` override.

use chrono::{NaiveTime, Timelike};
use chrono_tz::Tz;
use iana_time_zone::get_timezone;
use std::sync::OnceLock;
use tzf_rs::DefaultFinder;

use crate::error::SolgrafError;

// tzf-rs DefaultFinder is pre-compiled and very fast
static TZF_FINDER: OnceLock<DefaultFinder> = OnceLock::new();

// ===================== DECIMAL HOURS =====================

/// Convert a civil time-of-day to a fractional hour in [0, 24).
///
/// 14:30:00 maps to 14.5, 06:45:36 to 6.76. This is the single numeric
/// representation all six chart series use.
pub fn to_decimal_hours(t: NaiveTime) -> f64 {
    f64::from(t.hour()) + f64::from(t.minute()) / 60.0 + f64::from(t.second()) / 3600.0
}

/// Invert a fractional hour back to (hour, minute) at minute resolution.
///
/// Rounds to the nearest whole minute, wrapping 24:00 to 00:00, so any value
/// produced by [`to_decimal_hours`] from a second-free time round-trips
/// exactly. Used by the chart's axis labels, not by the pipeline itself.
pub fn to_clock(hours: f64) -> (u32, u32) {
    let total_minutes = (hours * 60.0).round() as u32;
    ((total_minutes / 60) % 24, total_minutes % 60)
}

/// Format a fractional hour as zero-padded `HH:MM`.
pub fn format_clock(hours: f64) -> String {
    let (h, m) = to_clock(hours);
    format!("{:02}:{:02}", h, m)
}

// ===================== TIMEZONE UTILITIES =====================

/// Get the system's configured timezone.
///
/// Falls back to UTC if the system timezone cannot be determined.
pub fn system_timezone() -> Tz {
    get_timezone().ok().and_then(|s| s.parse().ok()).unwrap_or(Tz::UTC)
}

/// Resolve timezone from geographic coordinates.
///
/// Uses a timezone finder to determine the appropriate timezone
/// for a given longitude and latitude, then parses the IANA name
/// into `chrono_tz::Tz` for historical correctness.
pub fn resolve_timezone(lon: f64, lat: f64) -> Tz {
    let finder = TZF_FINDER.get_or_init(DefaultFinder::new);
    let tzid = finder.get_tz_name(lon, lat);
    tzid.parse::<Tz>().unwrap_or(Tz::UTC)
}

/// Resolve the `--timezone` argument into a concrete zone.
///
/// Accepts the literal keywords `system` and `location`, or any IANA
/// identifier. An identifier unknown to the tz database is fatal at startup.
///
/// # Errors
/// Returns `UnknownTimezone` for an unrecognized IANA identifier.
pub fn select_timezone(spec: &str, longitude: f64, latitude: f64) -> Result<Tz, SolgrafError> {
    match spec {
        "system" => Ok(system_timezone()),
        "location" => Ok(resolve_timezone(longitude, latitude)),
        id => id.parse().map_err(|_| SolgrafError::UnknownTimezone { id: id.to_string() }),
    }
}

// ===================== TESTS =====================
