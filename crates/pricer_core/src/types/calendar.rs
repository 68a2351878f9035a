//! Holiday calendars and business-day adjustment.
//!
//! Calendars are plain data: a set of weekend days plus an explicit holiday
//! list. Products refer to them by [`HolidayCalendarId`]; the calendar itself
//! is looked up in [`ReferenceData`] during resolution, never at pricing time.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::calendar::{HolidayCalendar, HolidayCalendarId};
//! use pricer_core::types::{BusinessDayConvention, Date};
//!
//! let cal = HolidayCalendar::weekend_only(HolidayCalendarId::new("USNY"));
//! let saturday = Date::from_ymd(2015, 6, 13).unwrap();
//!
//! assert!(!cal.is_business_day(saturday));
//! assert_eq!(
//!     cal.adjust(saturday, BusinessDayConvention::Following),
//!     Date::from_ymd(2015, 6, 15).unwrap()
//! );
//! ```

use std::collections::BTreeSet;
use std::fmt;

use chrono::Weekday;

use super::time::{BusinessDayConvention, Date};
use crate::reference_data::{ReferenceData, ReferenceDataError};

/// Name of a holiday calendar, e.g. `"USNY"` or `"GBLO"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HolidayCalendarId(String);

impl HolidayCalendarId {
    /// Creates an identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Identifier of the calendar in which every day is a business day.
    pub fn no_holidays() -> Self {
        Self::new("NoHolidays")
    }

    /// Returns the calendar name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolidayCalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holiday calendar for business day calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidayCalendar {
    id: HolidayCalendarId,
    weekend_days: Vec<Weekday>,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from weekend days and explicit holidays.
    pub fn new(
        id: HolidayCalendarId,
        weekend_days: impl IntoIterator<Item = Weekday>,
        holidays: impl IntoIterator<Item = Date>,
    ) -> Self {
        let mut weekend_days: Vec<Weekday> = weekend_days.into_iter().collect();
        weekend_days.dedup();
        Self {
            id,
            weekend_days,
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Saturday/Sunday weekends and no holidays.
    pub fn weekend_only(id: HolidayCalendarId) -> Self {
        Self::new(id, [Weekday::Sat, Weekday::Sun], [])
    }

    /// Every day is a business day.
    pub fn no_holidays() -> Self {
        Self::new(HolidayCalendarId::no_holidays(), [], [])
    }

    /// Returns the calendar identifier.
    pub fn id(&self) -> &HolidayCalendarId {
        &self.id
    }

    /// Number of explicit holidays.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    /// True if the date is a weekend day or an explicit holiday.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.weekend_days.contains(&date.weekday()) || self.holidays.contains(&date)
    }

    /// Check if a date is a business day.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        !self.is_holiday(date)
    }

    /// The date itself if it is a business day, otherwise the next one.
    pub fn next_or_same(&self, mut date: Date) -> Date {
        while self.is_holiday(date) {
            date = date.plus_days(1);
        }
        date
    }

    /// The date itself if it is a business day, otherwise the previous one.
    pub fn previous_or_same(&self, mut date: Date) -> Date {
        while self.is_holiday(date) {
            date = date.plus_days(-1);
        }
        date
    }

    /// Moves by a signed number of business days.
    ///
    /// Zero returns the date unchanged, even if it is a holiday.
    pub fn add_business_days(&self, mut date: Date, days: i32) -> Date {
        let step = if days >= 0 { 1 } else { -1 };
        let mut remaining = days.unsigned_abs();

        while remaining > 0 {
            date = date.plus_days(step);
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }

        date
    }

    /// Rolls a date onto a business day following the convention.
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => self.next_or_same(date),
            BusinessDayConvention::Preceding => self.previous_or_same(date),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.next_or_same(date);
                if adjusted.month() != date.month() {
                    self.previous_or_same(date)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.previous_or_same(date);
                if adjusted.month() != date.month() {
                    self.next_or_same(date)
                } else {
                    adjusted
                }
            }
        }
    }
}

/// A business-day convention paired with the calendar it applies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusinessDayAdjustment {
    /// How to roll non-business days
    pub convention: BusinessDayConvention,
    /// Calendar that defines business days
    pub calendar: HolidayCalendarId,
}

impl BusinessDayAdjustment {
    /// Creates an adjustment.
    pub fn new(convention: BusinessDayConvention, calendar: HolidayCalendarId) -> Self {
        Self {
            convention,
            calendar,
        }
    }

    /// No adjustment at all.
    pub fn none() -> Self {
        Self::new(
            BusinessDayConvention::Unadjusted,
            HolidayCalendarId::no_holidays(),
        )
    }

    /// Adjusts a date, looking the calendar up in reference data.
    ///
    /// An unadjusted convention never touches reference data.
    ///
    /// # Errors
    /// `ReferenceDataError::NotFound` if the calendar is not present.
    pub fn adjust(&self, date: Date, ref_data: &ReferenceData) -> Result<Date, ReferenceDataError> {
        if self.convention == BusinessDayConvention::Unadjusted {
            return Ok(date);
        }
        let calendar = ref_data.get(&self.calendar)?;
        Ok(calendar.adjust(date, self.convention))
    }
}

/// A date that becomes a business day only once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjustableDate {
    /// Contractual date before adjustment
    pub unadjusted: Date,
    /// Rule to apply during resolution
    pub adjustment: BusinessDayAdjustment,
}

impl AdjustableDate {
    /// Creates an adjustable date.
    pub fn new(unadjusted: Date, adjustment: BusinessDayAdjustment) -> Self {
        Self {
            unadjusted,
            adjustment,
        }
    }

    /// A date that is never adjusted.
    pub fn unadjusted(date: Date) -> Self {
        Self::new(date, BusinessDayAdjustment::none())
    }

    /// Resolves the adjusted date.
    pub fn adjusted(&self, ref_data: &ReferenceData) -> Result<Date, ReferenceDataError> {
        self.adjustment.adjust(self.unadjusted, ref_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn london() -> HolidayCalendar {
        HolidayCalendar::new(
            HolidayCalendarId::new("GBLO"),
            [Weekday::Sat, Weekday::Sun],
            [date(2015, 12, 25), date(2015, 12, 28)],
        )
    }

    #[test]
    fn test_explicit_holidays_are_skipped() {
        let cal = london();
        assert_eq!(
            cal.adjust(date(2015, 12, 25), BusinessDayConvention::Following),
            date(2015, 12, 29)
        );
        assert_eq!(
            cal.adjust(date(2015, 12, 28), BusinessDayConvention::Preceding),
            date(2015, 12, 24)
        );
    }

    #[test]
    fn test_modified_following_stays_in_month() {
        let cal = HolidayCalendar::weekend_only(HolidayCalendarId::new("USNY"));
        // 2015-05-30 is a Saturday; following would cross into June.
        assert_eq!(
            cal.adjust(date(2015, 5, 30), BusinessDayConvention::ModifiedFollowing),
            date(2015, 5, 29)
        );
        assert_eq!(
            cal.adjust(date(2015, 5, 30), BusinessDayConvention::Following),
            date(2015, 6, 1)
        );
    }

    #[test]
    fn test_modified_preceding_stays_in_month() {
        let cal = HolidayCalendar::weekend_only(HolidayCalendarId::new("USNY"));
        // 2015-08-01 is a Saturday.
        assert_eq!(
            cal.adjust(date(2015, 8, 1), BusinessDayConvention::ModifiedPreceding),
            date(2015, 8, 3)
        );
    }

    #[test]
    fn test_add_business_days_both_directions() {
        let cal = london();
        let thursday = date(2015, 12, 24);
        assert_eq!(cal.add_business_days(thursday, 1), date(2015, 12, 29));
        assert_eq!(cal.add_business_days(date(2015, 12, 29), -2), date(2015, 12, 23));
        assert_eq!(cal.add_business_days(thursday, 0), thursday);
    }

    #[test]
    fn test_no_holidays_calendar() {
        let cal = HolidayCalendar::no_holidays();
        assert!(cal.is_business_day(date(2015, 6, 13)));
        assert_eq!(cal.holiday_count(), 0);
    }

    #[test]
    fn test_unadjusted_adjustment_skips_lookup() {
        let adj = BusinessDayAdjustment::new(
            BusinessDayConvention::Unadjusted,
            HolidayCalendarId::new("XXXX"),
        );
        let saturday = date(2015, 6, 13);
        assert_eq!(adj.adjust(saturday, &ReferenceData::empty()).unwrap(), saturday);
    }

    #[test]
    fn test_adjustment_with_missing_calendar_names_it() {
        let adj = BusinessDayAdjustment::new(
            BusinessDayConvention::Following,
            HolidayCalendarId::new("XXXX"),
        );
        let err = adj.adjust(date(2015, 6, 13), &ReferenceData::empty()).unwrap_err();
        assert!(err.to_string().contains("XXXX"));
    }
}
