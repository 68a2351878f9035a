//! Product construction error types.

use pricer_core::types::{Currency, Date};
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Product validation errors.
///
/// Returned by product constructors; an invalid product is never built.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::products::ProductError;
///
/// let err = ProductError::DateOrder {
///     first: "expiration date",
///     first_date: Date::from_ymd(2015, 6, 17).unwrap(),
///     second: "settlement date",
///     second_date: Date::from_ymd(2015, 6, 15).unwrap(),
/// };
/// assert_eq!(
///     format!("{}", err),
///     "expiration date 2015-06-17 must not be after settlement date 2015-06-15"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProductError {
    /// Two dates are in the wrong order.
    #[error("{first} {first_date} must not be after {second} {second_date}")]
    DateOrder {
        /// Name of the earlier date
        first: &'static str,
        /// Value of the earlier date
        first_date: Date,
        /// Name of the later date
        second: &'static str,
        /// Value of the later date
        second_date: Date,
    },

    /// A single-currency product was given several currencies.
    #[error("Expected a single currency, found {}", format_currencies(.currencies))]
    CrossCurrency {
        /// Currencies found, in order
        currencies: Vec<Currency>,
    },

    /// A floating-rate index is required but absent.
    #[error("Underlying swap must have at least one Ibor leg")]
    NoFloatingIndex,

    /// A swap without legs.
    #[error("Swap must have at least one leg")]
    EmptySwap,

    /// Payment frequency is not a multiple of the accrual frequency.
    #[error("Payment frequency {payment} is not a multiple of accrual frequency {accrual}")]
    InvalidFrequency {
        /// Payment frequency
        payment: String,
        /// Accrual frequency
        accrual: String,
    },

    /// Schedule construction failed.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

fn format_currencies(currencies: &[Currency]) -> String {
    currencies
        .iter()
        .map(Currency::code)
        .collect::<Vec<_>>()
        .join(", ")
}
