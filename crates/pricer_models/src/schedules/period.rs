//! A single schedule period.

use pricer_core::types::time::{Date, DayCountConvention};
use std::fmt;

/// One period of a resolved schedule.
///
/// Keeps both the contractual (unadjusted) boundaries and the business-day
/// adjusted ones; accrual uses the adjusted dates.
///
/// ```
/// use pricer_models::schedules::SchedulePeriod;
/// use pricer_core::types::time::{Date, DayCountConvention};
///
/// let period = SchedulePeriod::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
/// );
/// let yf = period.year_fraction(DayCountConvention::ActualActual360);
/// assert!((yf - 0.5056).abs() < 0.001); // 182/360
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePeriod {
    unadjusted_start: Date,
    unadjusted_end: Date,
    start: Date,
    end: Date,
}

impl SchedulePeriod {
    /// Creates a period from unadjusted and adjusted boundaries.
    #[inline]
    pub fn new(unadjusted_start: Date, unadjusted_end: Date, start: Date, end: Date) -> Self {
        Self {
            unadjusted_start,
            unadjusted_end,
            start,
            end,
        }
    }

    /// Contractual start date.
    #[inline]
    pub fn unadjusted_start(&self) -> Date {
        self.unadjusted_start
    }

    /// Contractual end date.
    #[inline]
    pub fn unadjusted_end(&self) -> Date {
        self.unadjusted_end
    }

    /// Adjusted start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Adjusted end date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Year fraction of the adjusted period.
    #[inline]
    pub fn year_fraction(&self, day_count: DayCountConvention) -> f64 {
        day_count.year_fraction_dates(self.start, self.end)
    }

    /// Returns true if the date falls in `[start, end)`.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for SchedulePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {})", self.start, self.end)
    }
}
