//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from pricer dispatch and valuation
//! - `DateError`: Errors from date construction and parsing
//! - `CurrencyError`: Errors from currency parsing and amount arithmetic

use std::fmt;
use thiserror::Error;

use crate::explain::ReportError;
use crate::market_data::MarketDataError;
use crate::types::currency::Currency;

/// Categorised pricing errors.
///
/// Every pricer operation returns this error. Market data and report
/// construction failures convert into it through `From`, so pricers can
/// propagate them with `?`.
///
/// # Variants
/// - `UnsupportedProduct`: No pricer registered for the product's variant
/// - `MarketData`: A curve, fixing, price or volatility was unavailable
/// - `InvalidProduct`: The product cannot be valued by the selected pricer
/// - `CurrencyMismatch`: Amounts in different currencies were combined
/// - `Report`: An explain row did not fit the declared columns
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::UnsupportedProduct { product: "Swaption".to_string() };
/// assert_eq!(format!("{}", err), "No pricer registered for product type: Swaption");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// No pricer was registered for the product variant.
    ///
    /// This is a wiring error in the caller, not a market condition.
    #[error("No pricer registered for product type: {product}")]
    UnsupportedProduct {
        /// Name of the product variant that could not be dispatched
        product: String,
    },

    /// Market data lookup failed.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// The product is structurally unsuitable for the pricer.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the running total
        expected: Currency,
        /// Currency of the offending amount
        found: Currency,
    },

    /// Explain report construction failed.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

impl From<CurrencyError> for PricingError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::Mismatch { left, right } => PricingError::CurrencyMismatch {
                expected: left,
                found: right,
            },
            other => PricingError::InvalidProduct(other.to_string()),
        }
    }
}

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::{Currency, CurrencyError};
///
/// let err = CurrencyError::Mismatch { left: Currency::USD, right: Currency::EUR };
/// assert_eq!(format!("{}", err), "Currency mismatch: USD and EUR");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Arithmetic between amounts in different currencies.
    #[error("Currency mismatch: {left} and {right}")]
    Mismatch {
        /// Currency of the left operand
        left: Currency,
        /// Currency of the right operand
        right: Currency,
    },
}
