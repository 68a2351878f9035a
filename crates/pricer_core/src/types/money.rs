//! Amounts of money tagged with their currency.

use std::fmt;

use super::currency::Currency;
use super::error::CurrencyError;

/// An amount of money in a single currency.
///
/// Immutable; arithmetic returns new values. Combining amounts in different
/// currencies fails with [`CurrencyError::Mismatch`] rather than converting.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Currency, CurrencyAmount};
///
/// let a = CurrencyAmount::new(Currency::USD, 100.0);
/// let b = CurrencyAmount::new(Currency::USD, 150.0);
/// assert_eq!(a.plus(b).unwrap().amount(), 250.0);
///
/// let eur = CurrencyAmount::new(Currency::EUR, 1.0);
/// assert!(a.plus(eur).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount.
    #[inline]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Zero in the given currency.
    #[inline]
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// Returns the currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the numeric amount.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds another amount in the same currency.
    ///
    /// # Errors
    /// `CurrencyError::Mismatch` when the currencies differ.
    pub fn plus(self, other: CurrencyAmount) -> Result<Self, CurrencyError> {
        self.check_currency(other)?;
        Ok(Self::new(self.currency, self.amount + other.amount))
    }

    /// Subtracts another amount in the same currency.
    ///
    /// # Errors
    /// `CurrencyError::Mismatch` when the currencies differ.
    pub fn minus(self, other: CurrencyAmount) -> Result<Self, CurrencyError> {
        self.check_currency(other)?;
        Ok(Self::new(self.currency, self.amount - other.amount))
    }

    /// Scales the amount by a factor.
    #[inline]
    pub fn multiplied_by(self, factor: f64) -> Self {
        Self::new(self.currency, self.amount * factor)
    }

    /// Flips the sign of the amount.
    #[inline]
    pub fn negated(self) -> Self {
        Self::new(self.currency, -self.amount)
    }

    fn check_currency(&self, other: CurrencyAmount) -> Result<(), CurrencyError> {
        if self.currency != other.currency {
            return Err(CurrencyError::Mismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(())
    }
}

impl fmt::Display for CurrencyAmount {
    /// Formats as `"USD 250.00"`, rounding to the currency's minor units.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.*}",
            self.currency,
            self.currency.decimal_places() as usize,
            self.amount
        )
    }
}
