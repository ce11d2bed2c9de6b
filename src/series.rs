//! Year Series Assembly Module
//!
//! Walks every valid calendar date of the target year, computes the sun
//! events, projects them into the three reference frames and collects the
//! decimal-hour values into one immutable, date-ordered series.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::SolgrafError;
use crate::frames::{TimeFrame, TimeZoneProjector};
use crate::solar::{SunEvent, SunEventCalculator};
use crate::time::to_decimal_hours;

// ===================== CALENDAR =====================

/// Number of days in a month, leap-year aware.
///
/// Enumerating exact day counts means an invalid date (like April 31) is
/// never even constructed.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    (next - first).num_days() as u32
}

// ===================== TYPES =====================

/// One date's six decimal-hour values, indexed by [`TimeFrame::index`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub sunrise_hours: [f64; 3],
    pub sunset_hours: [f64; 3],
}

/// The ordered collection of daily records spanning one calendar year.
///
/// Strictly increasing by date, one record per day that had both a sunrise
/// and a sunset. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct YearSeries {
    records: Vec<DailyRecord>,
}

impl YearSeries {
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up the record for a specific date, if that day was computable.
    pub fn record_for(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.records.binary_search_by_key(&date, |r| r.date).ok().map(|i| &self.records[i])
    }
}

// ===================== BUILDER =====================

/// Assembles a [`YearSeries`] from the calculator and projector.
///
/// The builder owns no state between runs; `build` is deterministic for a
/// fixed (location, year) pair.
#[derive(Clone, Copy, Debug)]
pub struct YearSeriesBuilder {
    calculator: SunEventCalculator,
    projector: TimeZoneProjector,
}

impl YearSeriesBuilder {
    pub fn new(calculator: SunEventCalculator, projector: TimeZoneProjector) -> Self {
        Self { calculator, projector }
    }

    /// Build the series for one calendar year.
    ///
    /// Days without a sunrise/sunset crossing are skipped (the record is
    /// simply absent, no placeholder). Any other calculation failure aborts
    /// the build.
    ///
    /// # Errors
    /// Propagates SPA range errors; `NoSunEvent` is recovered locally.
    pub fn build(&self, year: i32) -> Result<YearSeries, SolgrafError> {
        let mut records = Vec::with_capacity(366);

        for month in 1..=12 {
            for day in 1..=days_in_month(year, month) {
                let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
                match self.calculator.compute(date) {
                    Ok(event) => records.push(self.record(&event)),
                    Err(SolgrafError::NoSunEvent { .. }) => {
                        warn!(%date, "no sunrise/sunset crossing, skipping day");
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(YearSeries { records })
    }

    fn record(&self, event: &SunEvent) -> DailyRecord {
        let mut sunrise_hours = [0.0; 3];
        let mut sunset_hours = [0.0; 3];
        for frame in TimeFrame::ALL {
            let i = frame.index();
            sunrise_hours[i] = to_decimal_hours(self.projector.project(event.sunrise_utc, frame));
            sunset_hours[i] = to_decimal_hours(self.projector.project(event.sunset_utc, frame));
        }
        DailyRecord { date: event.date, sunrise_hours, sunset_hours }
    }
}

// ===================== TESTS =====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use chrono_tz::Europe::Oslo;

    fn oslo_builder() -> YearSeriesBuilder {
        let location = Location::new("Oslo", "Norway", "Europe/Oslo", 59.91, 10.75);
        YearSeriesBuilder::new(SunEventCalculator::new(&location), TimeZoneProjector::new(Oslo))
    }

    #[test]
    fn test_days_in_month_table() {
        assert_eq!(days_in_month(2024, 2), 29); // leap
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28); // century, not a leap year
        assert_eq!(days_in_month(2000, 2), 29); // 400-year rule
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_leap_year_completeness() {
        let series = oslo_builder().build(2024).unwrap();
        assert_eq!(series.len(), 366);
    }

    #[test]
    fn test_common_year_completeness_and_ordering() {
        let series = oslo_builder().build(2025).unwrap();
        assert_eq!(series.len(), 365);

        // Strictly increasing with no gaps: each record is exactly one day
        // after its predecessor.
        for pair in series.records().windows(2) {
            assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
        }
        assert_eq!(series.records()[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(series.records()[364].date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_range_and_offset_invariants() {
        let series = oslo_builder().build(2024).unwrap();
        let winter = TimeFrame::FixedWinterOffset.index();
        let summer = TimeFrame::FixedSummerOffset.index();

        for r in series.records() {
            for v in r.sunrise_hours.iter().chain(r.sunset_hours.iter()) {
                assert!((0.0..24.0).contains(v), "{}: hour {} out of range", r.date, v);
            }
            let rise_diff = (r.sunrise_hours[summer] - r.sunrise_hours[winter]).rem_euclid(24.0);
            let set_diff = (r.sunset_hours[summer] - r.sunset_hours[winter]).rem_euclid(24.0);
            assert!((rise_diff - 1.0).abs() < 1e-9, "{}: sunrise diff {}", r.date, rise_diff);
            assert!((set_diff - 1.0).abs() < 1e-9, "{}: sunset diff {}", r.date, set_diff);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = oslo_builder();
        assert_eq!(builder.build(2024).unwrap(), builder.build(2024).unwrap());
    }

    #[test]
    fn test_record_lookup() {
        let series = oslo_builder().build(2024).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
        let record = series.record_for(date).unwrap();
        assert_eq!(record.date, date);
        assert!(series.record_for(NaiveDate::from_ymd_opt(2023, 6, 21).unwrap()).is_none());
    }

    #[test]
    fn test_polar_latitude_skips_days_instead_of_failing() {
        // Tromsø has both midnight sun and polar night; the series must
        // still build, just with those stretches absent.
        let location = Location::new("Tromsø", "Norway", "Europe/Oslo", 69.6492, 18.9553);
        let builder = YearSeriesBuilder::new(
            SunEventCalculator::new(&location),
            TimeZoneProjector::new(Oslo),
        );
        let series = builder.build(2024).unwrap();
        assert!(!series.is_empty());
        assert!(series.len() < 366, "expected skipped polar days, got {}", series.len());
        // June 21 is inside the midnight-sun window
        assert!(series.record_for(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()).is_none());
        // The equinoxes are regular days everywhere
        assert!(series.record_for(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()).is_some());
        // Skipping must not disturb date ordering
        for pair in series.records().windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }
}
