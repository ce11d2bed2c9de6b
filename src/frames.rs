//! Time Reference Frames Module
//!
//! Projects UTC instants into the three reference frames the chart compares:
//! the location's real DST-switching timezone, and the two "what if the
//! offset never changed" counterfactuals (permanent winter time at UTC+1,
//! permanent summer time at UTC+2).

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use chrono_tz::Tz;

// ===================== TIME FRAMES =====================

/// One of the three civil time conventions a sun event is projected into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFrame {
    /// The location's real timezone, including historical DST transitions
    ActualLocal,
    /// Constant UTC+1, the offset Norway keeps in winter
    FixedWinterOffset,
    /// Constant UTC+2, the offset Norway keeps in summer
    FixedSummerOffset,
}

impl TimeFrame {
    /// Every frame, in the order the per-day hour arrays are indexed.
    pub const ALL: [Self; 3] = [Self::ActualLocal, Self::FixedWinterOffset, Self::FixedSummerOffset];

    /// Position of this frame in a `DailyRecord` hour array.
    pub const fn index(self) -> usize {
        match self {
            Self::ActualLocal => 0,
            Self::FixedWinterOffset => 1,
            Self::FixedSummerOffset => 2,
        }
    }
}

// ===================== PROJECTOR =====================

/// Maps UTC instants to civil times of day in each [`TimeFrame`].
///
/// Holds the resolved actual-local zone; the fixed frames are constants.
/// Projection is total: every UTC instant has a civil time in every frame.
#[derive(Clone, Copy, Debug)]
pub struct TimeZoneProjector {
    tz: Tz,
    winter: FixedOffset,
    summer: FixedOffset,
}

impl TimeZoneProjector {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            winter: FixedOffset::east_opt(3600).unwrap(),
            summer: FixedOffset::east_opt(7200).unwrap(),
        }
    }

    /// Civil time of day of `instant` in the given frame.
    pub fn project(&self, instant: DateTime<Utc>, frame: TimeFrame) -> NaiveTime {
        match frame {
            TimeFrame::ActualLocal => instant.with_timezone(&self.tz).time(),
            TimeFrame::FixedWinterOffset => instant.with_timezone(&self.winter).time(),
            TimeFrame::FixedSummerOffset => instant.with_timezone(&self.summer).time(),
        }
    }
}

// ===================== TESTS =====================
