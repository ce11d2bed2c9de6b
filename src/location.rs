//! Location Configuration Module
//!
//! The immutable observer record every computation step reads from. Created
//! once at startup from CLI arguments (or their compiled-in Oslo defaults)
//! and never mutated afterwards.

use chrono_tz::Tz;

use crate::error::SolgrafError;

// ===================== LOCATION =====================

/// A fixed geographic location with its civil timezone.
///
/// The latitude/longitude drive the astronomical calculation; the timezone
/// identifier only matters for the Actual Local reference frame and the
/// caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Display name used in the chart title (e.g. "Oslo")
    pub name: String,
    /// Region or country the location belongs to (e.g. "Norway")
    pub region: String,
    /// IANA timezone identifier (e.g. "Europe/Oslo")
    pub timezone_id: String,
    /// Latitude in decimal degrees, positive north
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east
    pub longitude: f64,
}

impl Location {
    pub fn new(name: &str, region: &str, timezone_id: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.to_string(),
            region: region.to_string(),
            timezone_id: timezone_id.to_string(),
            latitude,
            longitude,
        }
    }

    /// Resolve the stored identifier against the embedded tz database.
    ///
    /// # Errors
    /// Returns `UnknownTimezone` if the identifier is not a known IANA zone.
    /// This is checked once at startup so a bad configuration fails before
    /// any computation starts.
    pub fn timezone(&self) -> Result<Tz, SolgrafError> {
        self.timezone_id
            .parse()
            .map_err(|_| SolgrafError::UnknownTimezone { id: self.timezone_id.clone() })
    }
}

// ===================== TESTS =====================
