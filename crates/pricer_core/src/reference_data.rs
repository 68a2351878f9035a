//! Reference data: holiday calendars and index conventions keyed by identifier.
//!
//! Lookups are typed: each identifier type knows which value it resolves to,
//! so `ref_data.get(&calendar_id)` returns a `&HolidayCalendar` and
//! `ref_data.get(&index_id)` returns a `&IborIndex`.
//!
//! # Examples
//!
//! ```
//! use pricer_core::reference_data::ReferenceData;
//! use pricer_core::types::{HolidayCalendar, HolidayCalendarId};
//!
//! let id = HolidayCalendarId::new("USNY");
//! let ref_data = ReferenceData::empty().with_calendar(HolidayCalendar::weekend_only(id.clone()));
//!
//! assert!(ref_data.get(&id).is_ok());
//! assert!(ref_data.get(&HolidayCalendarId::new("GBLO")).is_err());
//! ```

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::types::{
    BusinessDayConvention, Currency, DayCountConvention, HolidayCalendar, HolidayCalendarId,
    IborIndex, IborIndexId,
};

/// Reference data lookup failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDataError {
    /// The identifier is not present.
    #[error("Reference data not found for identifier: {id}")]
    NotFound {
        /// The missing identifier
        id: String,
    },
}

/// An identifier that can be resolved against [`ReferenceData`].
pub trait ReferenceDataId: fmt::Display {
    /// The value the identifier refers to.
    type Value;

    /// Finds the value, or `None` if absent.
    fn lookup<'a>(&self, ref_data: &'a ReferenceData) -> Option<&'a Self::Value>;
}

impl ReferenceDataId for HolidayCalendarId {
    type Value = HolidayCalendar;

    fn lookup<'a>(&self, ref_data: &'a ReferenceData) -> Option<&'a HolidayCalendar> {
        ref_data.calendars.get(self)
    }
}

impl ReferenceDataId for IborIndexId {
    type Value = IborIndex;

    fn lookup<'a>(&self, ref_data: &'a ReferenceData) -> Option<&'a IborIndex> {
        ref_data.ibor_indices.get(self)
    }
}

/// Immutable store of calendars and index conventions.
///
/// Built by value with the `with_*` methods and then shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    calendars: HashMap<HolidayCalendarId, HolidayCalendar>,
    ibor_indices: HashMap<IborIndexId, IborIndex>,
}

impl ReferenceData {
    /// Reference data with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Weekend-only calendars for the major centres and their usual Ibor indices.
    ///
    /// Calendars: `NoHolidays`, `USNY`, `GBLO`, `EUTA`, `JPTO`, `CHZU`.
    pub fn standard() -> Self {
        let mut ref_data = Self::empty().with_calendar(HolidayCalendar::no_holidays());
        for name in ["USNY", "GBLO", "EUTA", "JPTO", "CHZU"] {
            ref_data = ref_data.with_calendar(HolidayCalendar::weekend_only(HolidayCalendarId::new(name)));
        }

        let definitions = [
            ("USD-LIBOR", Currency::USD, DayCountConvention::ActualActual360, "USNY", 2),
            ("EUR-EURIBOR", Currency::EUR, DayCountConvention::ActualActual360, "EUTA", 2),
            ("GBP-LIBOR", Currency::GBP, DayCountConvention::ActualActual365, "GBLO", 0),
            ("JPY-LIBOR", Currency::JPY, DayCountConvention::ActualActual360, "JPTO", 2),
            ("CHF-LIBOR", Currency::CHF, DayCountConvention::ActualActual360, "CHZU", 2),
        ];
        for (prefix, currency, day_count, calendar, offset) in definitions {
            for tenor in [1, 3, 6, 12] {
                ref_data = ref_data.with_ibor_index(IborIndex::new(
                    IborIndexId::new(format!("{prefix}-{tenor}M")),
                    currency,
                    tenor,
                    day_count,
                    HolidayCalendarId::new(calendar),
                    offset,
                    BusinessDayConvention::ModifiedFollowing,
                ));
            }
        }
        ref_data
    }

    /// Adds or replaces a calendar.
    pub fn with_calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.calendars.insert(calendar.id().clone(), calendar);
        self
    }

    /// Adds or replaces an Ibor index.
    pub fn with_ibor_index(mut self, index: IborIndex) -> Self {
        self.ibor_indices.insert(index.id().clone(), index);
        self
    }

    /// Looks up the value for an identifier.
    ///
    /// # Errors
    /// `ReferenceDataError::NotFound` naming the identifier.
    pub fn get<I: ReferenceDataId>(&self, id: &I) -> Result<&I::Value, ReferenceDataError> {
        id.lookup(self).ok_or_else(|| ReferenceDataError::NotFound { id: id.to_string() })
    }

    /// True if the identifier is present.
    pub fn contains<I: ReferenceDataId>(&self, id: &I) -> bool {
        id.lookup(self).is_some()
    }

    /// Calendar identifiers, sorted.
    pub fn calendar_ids(&self) -> Vec<&HolidayCalendarId> {
        let mut ids: Vec<_> = self.calendars.keys().collect();
        ids.sort();
        ids
    }

    /// Ibor index identifiers, sorted.
    pub fn ibor_index_ids(&self) -> Vec<&IborIndexId> {
        let mut ids: Vec<_> = self.ibor_indices.keys().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_contains_indices_and_their_calendars() {
        let ref_data = ReferenceData::standard();
        for id in ref_data.ibor_index_ids() {
            let index = ref_data.get(id).unwrap();
            assert!(ref_data.contains(index.fixing_calendar()));
        }
        let usd3m = ref_data.get(&IborIndexId::new("USD-LIBOR-3M")).unwrap();
        assert_eq!(usd3m.currency(), Currency::USD);
        assert_eq!(usd3m.tenor_months(), 3);
    }

    #[test]
    fn test_not_found_names_identifier() {
        let err = ReferenceData::empty()
            .get(&IborIndexId::new("USD-LIBOR-3M"))
            .unwrap_err();
        assert_eq!(
            err,
            ReferenceDataError::NotFound {
                id: "USD-LIBOR-3M".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Reference data not found for identifier: USD-LIBOR-3M"
        );
    }

    #[test]
    fn test_with_calendar_replaces() {
        let id = HolidayCalendarId::new("USNY");
        let ref_data = ReferenceData::empty()
            .with_calendar(HolidayCalendar::weekend_only(id.clone()))
            .with_calendar(HolidayCalendar::new(id.clone(), [], []));
        assert_eq!(ref_data.calendar_ids().len(), 1);
        let saturday = crate::types::Date::from_ymd(2015, 6, 13).unwrap();
        assert!(ref_data.get(&id).unwrap().is_business_day(saturday));
    }
}
