//! Core value types for valuation.
//!
//! This module provides:
//! - `time`: Date, DayCountConvention, BusinessDayConvention
//! - `calendar`: Holiday calendars, business-day adjustments, adjustable dates
//! - `currency`: ISO 4217 currency codes with metadata
//! - `money`: Currency-tagged amounts
//! - `direction`: Long/short and pay/receive flags
//! - `index`: Ibor index conventions and security identifiers
//! - `error`: Structured error types for pricing, dates and currencies
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod calendar;
pub mod currency;
pub mod direction;
pub mod error;
pub mod index;
pub mod money;
pub mod time;

pub use calendar::{AdjustableDate, BusinessDayAdjustment, HolidayCalendar, HolidayCalendarId};
pub use currency::Currency;
pub use direction::{LongShort, PayReceive};
pub use error::{CurrencyError, DateError, PricingError};
pub use index::{IborIndex, IborIndexId, SecurityId};
pub use money::CurrencyAmount;
pub use time::{BusinessDayConvention, Date, DayCountConvention};
