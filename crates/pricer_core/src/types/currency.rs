//! ISO 4217 currencies.
//!
//! Every product, curve and cash flow in the valuation core is tagged with a
//! [`Currency`]. The set is closed: market files naming any other code are
//! rejected when they are loaded.
//!
//! ```
//! use pricer_core::types::currency::Currency;
//!
//! let gbp: Currency = "gbp".parse().unwrap();
//! assert_eq!(gbp.to_string(), "GBP");
//! assert_eq!(Currency::JPY.decimal_places(), 0);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// Currency of an amount, curve or product.
///
/// Variants are ordered by declaration, so a `BTreeSet<Currency>` (for
/// example the currencies of a cross-currency swap) iterates the same way
/// on every run.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
}

/// Code and minor-unit precision, indexed by declaration order.
const METADATA: [(&str, u8); 5] = [("USD", 2), ("EUR", 2), ("GBP", 2), ("JPY", 0), ("CHF", 2)];

impl Currency {
    /// All supported currencies in declaration order.
    pub const ALL: [Currency; 5] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::CHF,
    ];

    fn metadata(self) -> (&'static str, u8) {
        METADATA[self as usize]
    }

    /// Three-letter ISO code.
    pub fn code(&self) -> &'static str {
        self.metadata().0
    }

    /// Number of minor units used when amounts are displayed.
    pub fn decimal_places(&self) -> u8 {
        self.metadata().1
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Case-insensitive ISO code lookup.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
