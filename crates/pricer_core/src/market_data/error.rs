//! Market data error types.

use thiserror::Error;

use crate::types::{Currency, Date};

/// Market data lookup and evaluation errors.
///
/// Converted into [`PricingError::MarketData`](crate::types::PricingError::MarketData)
/// when raised inside a pricer.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_core::types::Currency;
///
/// let err = MarketDataError::MissingDiscountCurve { currency: Currency::GBP };
/// assert_eq!(format!("{}", err), "No discount curve for GBP");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid time argument to a curve.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid time value
        t: f64,
    },

    /// No discount curve for a currency.
    #[error("No discount curve for {currency}")]
    MissingDiscountCurve {
        /// Currency without a curve
        currency: Currency,
    },

    /// No forward curve for an index.
    #[error("No forward curve for index {index}")]
    MissingForwardCurve {
        /// Index name
        index: String,
    },

    /// A past fixing is required but absent.
    #[error("Missing fixing for {index} on {date}")]
    MissingFixing {
        /// Index name
        index: String,
        /// Fixing date
        date: Date,
    },

    /// No price for an equity underlying.
    #[error("No price for security {security}")]
    MissingEquityPrice {
        /// Security identifier
        security: String,
    },

    /// No volatility for an index.
    #[error("No swaption volatility for index {index}")]
    MissingVolatility {
        /// Index name
        index: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fixing_display() {
        let err = MarketDataError::MissingFixing {
            index: "USD-LIBOR-3M".to_string(),
            date: Date::from_ymd(2015, 6, 15).unwrap(),
        };
        assert_eq!(
            format!("{}", err),
            "Missing fixing for USD-LIBOR-3M on 2015-06-15"
        );
    }

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }
}
