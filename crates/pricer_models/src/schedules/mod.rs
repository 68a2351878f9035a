//! Schedule generation for swap legs.
//!
//! This module provides:
//! - [`PeriodicSchedule`]: Contractual description of a regular schedule
//! - [`Schedule`]: The resolved, business-day adjusted periods
//! - [`SchedulePeriod`]: A single period with unadjusted and adjusted dates
//! - [`Frequency`]: Period frequency (Annual, SemiAnnual, Quarterly, Monthly)
//!
//! # Examples
//!
//! ```
//! use pricer_core::reference_data::ReferenceData;
//! use pricer_core::types::{BusinessDayAdjustment, BusinessDayConvention, Date, HolidayCalendarId};
//! use pricer_models::schedules::{Frequency, PeriodicSchedule};
//!
//! let schedule = PeriodicSchedule::new(
//!     Date::from_ymd(2024, 1, 15).unwrap(),
//!     Date::from_ymd(2026, 1, 15).unwrap(),
//!     Frequency::SemiAnnual,
//!     BusinessDayAdjustment::new(BusinessDayConvention::ModifiedFollowing, HolidayCalendarId::new("USNY")),
//! )
//! .unwrap();
//!
//! let resolved = schedule.resolve(&ReferenceData::standard()).unwrap();
//! assert_eq!(resolved.len(), 4);
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::SchedulePeriod;
pub use schedule::{PeriodicSchedule, Schedule};
