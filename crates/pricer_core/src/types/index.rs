//! Rate index conventions and security identifiers.

use std::fmt;

use super::calendar::{HolidayCalendar, HolidayCalendarId};
use super::currency::Currency;
use super::time::{BusinessDayConvention, Date, DayCountConvention};

/// Name of an Ibor index, e.g. `"USD-LIBOR-3M"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct IborIndexId(String);

impl IborIndexId {
    /// Creates an identifier from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the index name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IborIndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conventions of an interbank offered rate index.
///
/// Resolution uses these to turn an accrual period into fixing, effective
/// and maturity dates; pricers only see the resolved dates.
///
/// # Examples
///
/// ```
/// use pricer_core::types::calendar::{HolidayCalendar, HolidayCalendarId};
/// use pricer_core::types::index::{IborIndex, IborIndexId};
/// use pricer_core::types::{BusinessDayConvention, Currency, Date, DayCountConvention};
///
/// let index = IborIndex::new(
///     IborIndexId::new("USD-LIBOR-3M"),
///     Currency::USD,
///     3,
///     DayCountConvention::ActualActual360,
///     HolidayCalendarId::new("USNY"),
///     2,
///     BusinessDayConvention::ModifiedFollowing,
/// );
/// let cal = HolidayCalendar::weekend_only(HolidayCalendarId::new("USNY"));
///
/// let start = Date::from_ymd(2015, 6, 17).unwrap();
/// let fixing = index.fixing_date(start, &cal);
/// assert_eq!(fixing, Date::from_ymd(2015, 6, 15).unwrap());
/// assert_eq!(index.effective_date(fixing, &cal), start);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IborIndex {
    id: IborIndexId,
    currency: Currency,
    tenor_months: u32,
    day_count: DayCountConvention,
    fixing_calendar: HolidayCalendarId,
    fixing_offset_days: u32,
    maturity_convention: BusinessDayConvention,
}

impl IborIndex {
    /// Creates an index definition.
    pub fn new(
        id: IborIndexId,
        currency: Currency,
        tenor_months: u32,
        day_count: DayCountConvention,
        fixing_calendar: HolidayCalendarId,
        fixing_offset_days: u32,
        maturity_convention: BusinessDayConvention,
    ) -> Self {
        Self {
            id,
            currency,
            tenor_months,
            day_count,
            fixing_calendar,
            fixing_offset_days,
            maturity_convention,
        }
    }

    /// Index identifier.
    pub fn id(&self) -> &IborIndexId {
        &self.id
    }

    /// Currency of the index.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Tenor in months.
    pub fn tenor_months(&self) -> u32 {
        self.tenor_months
    }

    /// Day count used by the index for its own rate period.
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Calendar on which the index fixes.
    pub fn fixing_calendar(&self) -> &HolidayCalendarId {
        &self.fixing_calendar
    }

    /// Business days between fixing and effective date.
    pub fn fixing_offset_days(&self) -> u32 {
        self.fixing_offset_days
    }

    /// Convention used to adjust the maturity date.
    pub fn maturity_convention(&self) -> BusinessDayConvention {
        self.maturity_convention
    }

    /// Fixing date for a rate period starting on `effective_date`.
    pub fn fixing_date(&self, effective_date: Date, calendar: &HolidayCalendar) -> Date {
        calendar.add_business_days(effective_date, -(self.fixing_offset_days as i32))
    }

    /// Effective date of the rate fixed on `fixing_date`.
    pub fn effective_date(&self, fixing_date: Date, calendar: &HolidayCalendar) -> Date {
        calendar.add_business_days(fixing_date, self.fixing_offset_days as i32)
    }

    /// Maturity of the deposit starting on `effective_date`.
    pub fn maturity_date(&self, effective_date: Date, calendar: &HolidayCalendar) -> Date {
        calendar.adjust(
            effective_date.plus_months(self.tenor_months as i32),
            self.maturity_convention,
        )
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Identifier of a listed security, such as an equity future's underlying.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SecurityId(String);

impl SecurityId {
    /// Creates an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecurityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gbp_6m() -> IborIndex {
        IborIndex::new(
            IborIndexId::new("GBP-LIBOR-6M"),
            Currency::GBP,
            6,
            DayCountConvention::ActualActual365,
            HolidayCalendarId::new("GBLO"),
            0,
            BusinessDayConvention::ModifiedFollowing,
        )
    }

    #[test]
    fn test_same_day_fixing() {
        let cal = HolidayCalendar::weekend_only(HolidayCalendarId::new("GBLO"));
        let start = Date::from_ymd(2015, 6, 17).unwrap();
        assert_eq!(gbp_6m().fixing_date(start, &cal), start);
    }

    #[test]
    fn test_maturity_rolls_modified_following() {
        let cal = HolidayCalendar::weekend_only(HolidayCalendarId::new("GBLO"));
        // 2015-11-30 + 6M = 2016-05-30 (Monday)
        let start = Date::from_ymd(2015, 11, 30).unwrap();
        assert_eq!(
            gbp_6m().maturity_date(start, &cal),
            Date::from_ymd(2016, 5, 30).unwrap()
        );
        // 2015-07-31 + 6M = 2016-01-31 (Sunday) rolls back to Friday 29th
        let start = Date::from_ymd(2015, 7, 31).unwrap();
        assert_eq!(
            gbp_6m().maturity_date(start, &cal),
            Date::from_ymd(2016, 1, 29).unwrap()
        );
    }

    #[test]
    fn test_identifiers_display() {
        assert_eq!(IborIndexId::new("EUR-EURIBOR-3M").to_string(), "EUR-EURIBOR-3M");
        assert_eq!(SecurityId::new("OG-Future").as_str(), "OG-Future");
        assert_eq!(gbp_6m().to_string(), "GBP-LIBOR-6M");
    }
}
