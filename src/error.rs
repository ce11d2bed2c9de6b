//! Error Types Module
//!
//! Typed failures for the computation pipeline. The tool is a one-shot batch
//! run, so nothing here is retried: errors either get skipped locally (a day
//! without a sunrise/sunset crossing) or abort the whole run.

use chrono::NaiveDate;
use thiserror::Error;

// ===================== ERROR TYPES =====================

/// Errors raised by the sun event pipeline.
#[derive(Debug, Error)]
pub enum SolgrafError {
    /// The sun never crosses the horizon on this date at the configured
    /// latitude (polar day or polar night).
    #[error("no sunrise/sunset crossing on {date} at this latitude (polar day or night)")]
    NoSunEvent { date: NaiveDate },

    /// The configured timezone identifier is not in the embedded tz database.
    #[error("unknown IANA timezone identifier: {id}")]
    UnknownTimezone { id: String },

    /// The solar position algorithm rejected its inputs (coordinates or
    /// date outside the model's valid range).
    #[error("solar position calculation failed: {0}")]
    Solar(#[from] solar_positioning::Error),

    /// The chart backend failed to draw or write the image.
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

// ===================== TESTS =====================
