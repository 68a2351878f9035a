//! Equity futures.

use pricer_core::reference_data::{ReferenceData, ReferenceDataError};
use pricer_core::types::{Currency, CurrencyAmount, Date, SecurityId};

use super::error::ProductError;
use super::traits::Resolvable;

/// An exchange-traded future on an equity or index.
///
/// Needs no reference data, so it is its own resolved form.
///
/// # Invariants
///
/// - `expiration_date <= settlement_date`
/// - strike and unit amount are finite
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Currency, CurrencyAmount, Date, SecurityId};
/// use pricer_models::products::EquityFuture;
///
/// let future = EquityFuture::new(
///     SecurityId::new("OG-Future"),
///     Date::from_ymd(2015, 6, 15).unwrap(),
///     Date::from_ymd(2015, 6, 17).unwrap(),
///     100.0,
///     CurrencyAmount::new(Currency::USD, 250.0),
/// )
/// .unwrap();
///
/// assert_eq!(future.currency(), Currency::USD);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EquityFuture {
    underlying: SecurityId,
    expiration_date: Date,
    settlement_date: Date,
    strike_price: f64,
    unit_amount: CurrencyAmount,
}

impl EquityFuture {
    /// Creates an equity future.
    ///
    /// # Errors
    ///
    /// - `ProductError::DateOrder` if expiration is after settlement
    /// - `ProductError::InvalidParameter` for a non-finite strike or unit amount
    pub fn new(
        underlying: SecurityId,
        expiration_date: Date,
        settlement_date: Date,
        strike_price: f64,
        unit_amount: CurrencyAmount,
    ) -> Result<Self, ProductError> {
        if expiration_date > settlement_date {
            return Err(ProductError::DateOrder {
                first: "expiration date",
                first_date: expiration_date,
                second: "settlement date",
                second_date: settlement_date,
            });
        }
        if !strike_price.is_finite() || !unit_amount.amount().is_finite() {
            return Err(ProductError::InvalidParameter {
                message: "strike price and unit amount must be finite".to_string(),
            });
        }
        Ok(Self {
            underlying,
            expiration_date,
            settlement_date,
            strike_price,
            unit_amount,
        })
    }

    /// The security the future is written on.
    pub fn underlying(&self) -> &SecurityId {
        &self.underlying
    }

    /// Last trading date.
    pub fn expiration_date(&self) -> Date {
        self.expiration_date
    }

    /// Date the asset transfer takes place.
    pub fn settlement_date(&self) -> Date {
        self.settlement_date
    }

    /// Price agreed at the start of the contract.
    pub fn strike_price(&self) -> f64 {
        self.strike_price
    }

    /// Value of one contract per point of price movement.
    pub fn unit_amount(&self) -> CurrencyAmount {
        self.unit_amount
    }

    /// Currency of the future, taken from the unit amount.
    pub fn currency(&self) -> Currency {
        self.unit_amount.currency()
    }
}

impl Resolvable for EquityFuture {
    type Resolved = EquityFuture;

    fn resolve(&self, _ref_data: &ReferenceData) -> Result<EquityFuture, ReferenceDataError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn og_future(expiration: Date, settlement: Date) -> Result<EquityFuture, ProductError> {
        EquityFuture::new(
            SecurityId::new("OG-Future"),
            expiration,
            settlement,
            100.0,
            CurrencyAmount::new(Currency::USD, 250.0),
        )
    }

    #[test]
    fn test_resolves_to_itself() {
        let future = og_future(
            Date::from_ymd(2015, 6, 15).unwrap(),
            Date::from_ymd(2015, 6, 17).unwrap(),
        )
        .unwrap();
        let resolved = future.resolve(&ReferenceData::empty()).unwrap();
        assert_eq!(resolved, future);
        assert_eq!(resolved.currency(), Currency::USD);
        assert_eq!(resolved.strike_price(), 100.0);
    }

    #[test]
    fn test_same_day_expiry_and_settlement() {
        let date = Date::from_ymd(2015, 6, 15).unwrap();
        assert!(og_future(date, date).is_ok());
    }

    #[test]
    fn test_rejects_nan_strike() {
        let err = EquityFuture::new(
            SecurityId::new("OG-Future"),
            Date::from_ymd(2015, 6, 15).unwrap(),
            Date::from_ymd(2015, 6, 17).unwrap(),
            f64::NAN,
            CurrencyAmount::new(Currency::USD, 250.0),
        )
        .unwrap_err();
        assert!(matches!(err, ProductError::InvalidParameter { .. }));
    }

    fn date_strategy() -> impl Strategy<Value = Date> {
        (2000i32..2050i32, 1u32..13u32, 1u32..29u32)
            .prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
    }

    fn currency_strategy() -> impl Strategy<Value = Currency> {
        prop::sample::select(Currency::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_ordered_dates_construct(
            expiration in date_strategy(),
            gap in 0i64..400,
            currency in currency_strategy(),
            unit in -1.0e6f64..1.0e6,
        ) {
            let settlement = expiration.plus_days(gap);
            let future = EquityFuture::new(
                SecurityId::new("X"),
                expiration,
                settlement,
                100.0,
                CurrencyAmount::new(currency, unit),
            );
            prop_assert!(future.is_ok());
            prop_assert_eq!(future.unwrap().currency(), currency);
        }

        #[test]
        fn test_reversed_dates_fail(settlement in date_strategy(), gap in 1i64..400) {
            let expiration = settlement.plus_days(gap);
            let result = og_future(expiration, settlement);
            let is_date_order = matches!(result, Err(ProductError::DateOrder { .. }));
            prop_assert!(is_date_order);
        }
    }
}
