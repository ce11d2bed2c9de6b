//! Today Annotation Module
//!
//! Formats the "today" summary shown in the on-chart text box and echoed as
//! the run's single diagnostic line.

use chrono::NaiveDate;

use crate::error::SolgrafError;
use crate::frames::{TimeFrame, TimeZoneProjector};
use crate::solar::SunEventCalculator;

// ===================== CAPTION =====================

/// The human-readable summary of today's sunrise and sunset.
///
/// Computed once, consumed once by the chart; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
    pub date: NaiveDate,
    pub sunrise_local_text: String,
    pub sunset_local_text: String,
    pub rendered: String,
}

// ===================== ANNOTATOR =====================

/// Produces the [`Caption`] for a given "today".
///
/// Only the Actual Local frame appears in the caption; the fixed frames are
/// chart-only.
#[derive(Clone, Copy, Debug)]
pub struct TodayAnnotator {
    calculator: SunEventCalculator,
    projector: TimeZoneProjector,
}

impl TodayAnnotator {
    pub fn new(calculator: SunEventCalculator, projector: TimeZoneProjector) -> Self {
        Self { calculator, projector }
    }

    /// Compute and format today's summary.
    ///
    /// # Errors
    /// A day without a sunrise/sunset crossing propagates unrecovered; there
    /// is no sensible caption for a polar day.
    pub fn annotate(&self, today: NaiveDate) -> Result<Caption, SolgrafError> {
        let event = self.calculator.compute(today)?;
        let sunrise = self.projector.project(event.sunrise_utc, TimeFrame::ActualLocal);
        let sunset = self.projector.project(event.sunset_utc, TimeFrame::ActualLocal);

        let sunrise_local_text = sunrise.format("%H:%M").to_string();
        let sunset_local_text = sunset.format("%H:%M").to_string();
        let rendered = format!(
            "I dag ({}): Soloppgang {}  |  Solnedgang {}",
            today.format("%d.%m"),
            sunrise_local_text,
            sunset_local_text
        );

        Ok(Caption { date: today, sunrise_local_text, sunset_local_text, rendered })
    }
}

// ===================== TESTS =====================
