//! Sun Event Calculation Module
//!
//! Per-date sunrise/sunset lookup. Uses the NREL SPA (Solar Position
//! Algorithm, Reda & Andreas 2003) with the standard sunrise/sunset horizon
//! (0.833° below geometric, i.e. refraction plus solar radius) and the
//! Espenak–Meeus ΔT estimate, so results are reproducible bit for bit.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use solar_positioning::{Horizon, spa, time::DeltaT, types::SunriseResult};

use crate::error::SolgrafError;
use crate::location::Location;

// ===================== TYPES =====================

/// The UTC sunrise and sunset instants of one calendar date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunEvent {
    pub date: NaiveDate,
    pub sunrise_utc: DateTime<Utc>,
    pub sunset_utc: DateTime<Utc>,
}

// ===================== CALCULATOR =====================

/// Computes sunrise/sunset instants for a fixed observer.
///
/// Only the coordinates matter here; the civil timezone plays no role until
/// projection. The calculation is anchored to midnight UTC of the requested
/// date, matching a per-calendar-date lookup.
#[derive(Clone, Copy, Debug)]
pub struct SunEventCalculator {
    latitude: f64,
    longitude: f64,
}

impl SunEventCalculator {
    pub fn new(location: &Location) -> Self {
        Self { latitude: location.latitude, longitude: location.longitude }
    }

    /// Compute the sun events for one calendar date.
    ///
    /// # Errors
    /// Returns `NoSunEvent` when the sun never crosses the horizon on this
    /// date (polar day or polar night), and propagates SPA range errors for
    /// inputs outside the algorithm's validity window.
    pub fn compute(&self, date: NaiveDate) -> Result<SunEvent, SolgrafError> {
        let anchor = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap());
        let delta_t = DeltaT::estimate_from_date(date.year(), date.month())?;

        match spa::sunrise_sunset_for_horizon(
            anchor,
            self.latitude,
            self.longitude,
            delta_t,
            Horizon::SunriseSunset,
        )? {
            SunriseResult::RegularDay { sunrise, sunset, .. } => {
                Ok(SunEvent { date, sunrise_utc: sunrise, sunset_utc: sunset })
            }
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => {
                Err(SolgrafError::NoSunEvent { date })
            }
        }
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::{TimeFrame, TimeZoneProjector};
    use crate::time::to_decimal_hours;
    use chrono_tz::Europe::Oslo;

    fn oslo_calc() -> SunEventCalculator {
        SunEventCalculator::new(&Location::new("Oslo", "Norway", "Europe/Oslo", 59.91, 10.75))
    }

    /// Assert a local-time decimal hour is within `tol_minutes` of HH:MM.
    fn assert_close(actual: f64, h: u32, m: u32, tol_minutes: f64, what: &str) {
        let expected = f64::from(h) + f64::from(m) / 60.0;
        let diff_minutes = (actual - expected).abs() * 60.0;
        assert!(
            diff_minutes <= tol_minutes,
            "{} was {:.4} h, expected {:02}:{:02} ±{} min (off by {:.1} min)",
            what,
            actual,
            h,
            m,
            tol_minutes,
            diff_minutes
        );
    }

    #[test]
    fn test_oslo_summer_solstice_reference() {
        // NOAA-reference values for Oslo, 2024-06-21: sunrise 03:54,
        // sunset 22:44 local (CEST).
        let event = oslo_calc().compute(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()).unwrap();
        let p = TimeZoneProjector::new(Oslo);
        let sunrise = to_decimal_hours(p.project(event.sunrise_utc, TimeFrame::ActualLocal));
        let sunset = to_decimal_hours(p.project(event.sunset_utc, TimeFrame::ActualLocal));
        assert_close(sunrise, 3, 54, 2.0, "summer solstice sunrise");
        assert_close(sunset, 22, 44, 2.0, "summer solstice sunset");
    }

    #[test]
    fn test_oslo_winter_solstice_reference() {
        // NOAA-reference values for Oslo, 2024-12-21: sunrise 09:18,
        // sunset 15:12 local (CET).
        let event = oslo_calc().compute(NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()).unwrap();
        let p = TimeZoneProjector::new(Oslo);
        let sunrise = to_decimal_hours(p.project(event.sunrise_utc, TimeFrame::ActualLocal));
        let sunset = to_decimal_hours(p.project(event.sunset_utc, TimeFrame::ActualLocal));
        assert_close(sunrise, 9, 18, 2.0, "winter solstice sunrise");
        assert_close(sunset, 15, 12, 2.0, "winter solstice sunset");
    }

    #[test]
    fn test_sunrise_precedes_sunset() {
        let calc = oslo_calc();
        for (month, day) in [(3, 1), (6, 21), (9, 23), (12, 21)] {
            let event = calc.compute(NaiveDate::from_ymd_opt(2024, month, day).unwrap()).unwrap();
            assert!(event.sunrise_utc < event.sunset_utc);
        }
    }

    #[test]
    fn test_tromso_polar_day_and_night() {
        let calc = SunEventCalculator::new(&Location::new(
            "Tromsø",
            "Norway",
            "Europe/Oslo",
            69.6492,
            18.9553,
        ));
        // Midnight sun in June
        assert!(matches!(
            calc.compute(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()),
            Err(SolgrafError::NoSunEvent { .. })
        ));
        // Polar night in late December
        assert!(matches!(
            calc.compute(NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()),
            Err(SolgrafError::NoSunEvent { .. })
        ));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let calc = oslo_calc();
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(calc.compute(date).unwrap(), calc.compute(date).unwrap());
    }
}
