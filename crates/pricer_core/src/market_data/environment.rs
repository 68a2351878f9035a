//! The market view a pricer values against.
//!
//! [`PricingEnvironment`] is the only way pricers see market data. It is a
//! narrow read-only interface so that curve construction, interpolation and
//! market data sourcing stay outside the valuation core.

use std::collections::HashMap;

use super::curves::{FlatCurve, YieldCurve};
use super::error::MarketDataError;
use crate::types::{Currency, Date, DayCountConvention, IborIndexId, SecurityId};

/// Read-only market data as of a valuation date.
///
/// Implementations must be shareable across threads; the same environment
/// is typically used by many pricing calls at once.
///
/// Dates before [`valuation_date`](Self::valuation_date) are outside the
/// contract: implementations return some deterministic value and must not
/// panic, but callers should not rely on what it is.
pub trait PricingEnvironment: Send + Sync {
    /// The date all present values are discounted to.
    fn valuation_date(&self) -> Date;

    /// Discount factor from `date` back to the valuation date.
    fn discount_factor(&self, currency: Currency, date: Date) -> Result<f64, MarketDataError>;

    /// Simple forward rate of `index` over the observation window from
    /// `effective_date` to `maturity_date`, accruing `year_fraction` in the
    /// index day count.
    fn forward_rate(
        &self,
        index: &IborIndexId,
        effective_date: Date,
        maturity_date: Date,
        year_fraction: f64,
    ) -> Result<f64, MarketDataError>;

    /// Historic fixing of an index, if known.
    fn fixing(&self, index: &IborIndexId, fixing_date: Date) -> Option<f64>;

    /// Current price of a security.
    fn equity_price(&self, security: &SecurityId) -> Result<f64, MarketDataError>;

    /// Black volatility for a swaption on `index` expiring on `expiry`
    /// over an underlying of `tenor_years`.
    fn swaption_volatility(
        &self,
        index: &IborIndexId,
        expiry: Date,
        tenor_years: f64,
    ) -> Result<f64, MarketDataError>;

    /// Year fraction from the valuation date, ACT/365F.
    fn relative_time(&self, date: Date) -> f64 {
        DayCountConvention::ActualActual365.year_fraction_dates(self.valuation_date(), date)
    }
}

/// In-memory [`PricingEnvironment`] of flat curves and quoted values.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment, PricingEnvironment};
/// use pricer_core::types::{Currency, Date, SecurityId};
///
/// let env = ImmutablePricingEnvironment::new(Date::from_ymd(2015, 6, 15).unwrap())
///     .with_discount_curve(Currency::USD, FlatCurve::new(0.02))
///     .with_equity_price(SecurityId::new("OG-Future"), 101.5);
///
/// assert_eq!(env.equity_price(&SecurityId::new("OG-Future")).unwrap(), 101.5);
/// ```
#[derive(Debug, Clone)]
pub struct ImmutablePricingEnvironment {
    valuation_date: Date,
    discount_curves: HashMap<Currency, FlatCurve<f64>>,
    forward_curves: HashMap<IborIndexId, FlatCurve<f64>>,
    fixings: HashMap<(IborIndexId, Date), f64>,
    equity_prices: HashMap<SecurityId, f64>,
    swaption_volatilities: HashMap<IborIndexId, f64>,
}

impl ImmutablePricingEnvironment {
    /// An environment with no market data.
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            discount_curves: HashMap::new(),
            forward_curves: HashMap::new(),
            fixings: HashMap::new(),
            equity_prices: HashMap::new(),
            swaption_volatilities: HashMap::new(),
        }
    }

    /// Adds the discount curve of a currency.
    pub fn with_discount_curve(mut self, currency: Currency, curve: FlatCurve<f64>) -> Self {
        self.discount_curves.insert(currency, curve);
        self
    }

    /// Adds the forward curve of an index.
    pub fn with_forward_curve(mut self, index: IborIndexId, curve: FlatCurve<f64>) -> Self {
        self.forward_curves.insert(index, curve);
        self
    }

    /// Adds a historic fixing.
    pub fn with_fixing(mut self, index: IborIndexId, date: Date, value: f64) -> Self {
        self.fixings.insert((index, date), value);
        self
    }

    /// Adds a security price.
    pub fn with_equity_price(mut self, security: SecurityId, price: f64) -> Self {
        self.equity_prices.insert(security, price);
        self
    }

    /// Adds a flat swaption volatility for an index.
    pub fn with_swaption_volatility(mut self, index: IborIndexId, volatility: f64) -> Self {
        self.swaption_volatilities.insert(index, volatility);
        self
    }

    /// Currencies with a discount curve, sorted.
    pub fn discount_currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<_> = self.discount_curves.keys().copied().collect();
        currencies.sort();
        currencies
    }
}

impl PricingEnvironment for ImmutablePricingEnvironment {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn discount_factor(&self, currency: Currency, date: Date) -> Result<f64, MarketDataError> {
        let curve = self
            .discount_curves
            .get(&currency)
            .ok_or(MarketDataError::MissingDiscountCurve { currency })?;
        curve.discount_factor(self.relative_time(date))
    }

    fn forward_rate(
        &self,
        index: &IborIndexId,
        effective_date: Date,
        maturity_date: Date,
        year_fraction: f64,
    ) -> Result<f64, MarketDataError> {
        let curve = self
            .forward_curves
            .get(index)
            .ok_or_else(|| MarketDataError::MissingForwardCurve {
                index: index.to_string(),
            })?;
        if year_fraction <= 0.0 || maturity_date <= effective_date {
            return Err(MarketDataError::InvalidMaturity { t: year_fraction });
        }
        let start = curve.discount_factor(self.relative_time(effective_date))?;
        let end = curve.discount_factor(self.relative_time(maturity_date))?;
        Ok((start / end - 1.0) / year_fraction)
    }

    fn fixing(&self, index: &IborIndexId, fixing_date: Date) -> Option<f64> {
        self.fixings.get(&(index.clone(), fixing_date)).copied()
    }

    fn equity_price(&self, security: &SecurityId) -> Result<f64, MarketDataError> {
        self.equity_prices
            .get(security)
            .copied()
            .ok_or_else(|| MarketDataError::MissingEquityPrice {
                security: security.to_string(),
            })
    }

    fn swaption_volatility(
        &self,
        index: &IborIndexId,
        _expiry: Date,
        _tenor_years: f64,
    ) -> Result<f64, MarketDataError> {
        self.swaption_volatilities
            .get(index)
            .copied()
            .ok_or_else(|| MarketDataError::MissingVolatility {
                index: index.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn usd_3m() -> IborIndexId {
        IborIndexId::new("USD-LIBOR-3M")
    }

    #[test]
    fn test_discount_factor_one_year() {
        let env = ImmutablePricingEnvironment::new(date(2015, 1, 1))
            .with_discount_curve(Currency::USD, FlatCurve::new(0.05));
        let df = env.discount_factor(Currency::USD, date(2016, 1, 1)).unwrap();
        assert_relative_eq!(df, (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factor_before_valuation_date_does_not_fail() {
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15))
            .with_discount_curve(Currency::USD, FlatCurve::new(0.05));
        let df = env.discount_factor(Currency::USD, date(2015, 6, 1)).unwrap();
        assert!(df > 1.0);
    }

    #[test]
    fn test_missing_discount_curve() {
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15));
        assert_eq!(
            env.discount_factor(Currency::EUR, date(2016, 1, 1)),
            Err(MarketDataError::MissingDiscountCurve {
                currency: Currency::EUR
            })
        );
    }

    #[test]
    fn test_forward_rate_from_flat_curve() {
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15))
            .with_forward_curve(usd_3m(), FlatCurve::new(0.012));
        // 91 days, ACT/360
        let yf = 91.0 / 360.0;
        let rate = env
            .forward_rate(&usd_3m(), date(2015, 9, 17), date(2015, 12, 17), yf)
            .unwrap();
        assert_relative_eq!(rate, ((0.012_f64 * 91.0 / 365.0).exp() - 1.0) / yf, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_depends_on_window() {
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15))
            .with_forward_curve(usd_3m(), FlatCurve::new(0.012));
        let three_months = env
            .forward_rate(&usd_3m(), date(2015, 9, 17), date(2015, 12, 17), 91.0 / 360.0)
            .unwrap();
        let one_year = env
            .forward_rate(&usd_3m(), date(2015, 9, 17), date(2016, 9, 17), 1.0)
            .unwrap();
        assert_relative_eq!(one_year, (0.012_f64 * 366.0 / 365.0).exp() - 1.0, epsilon = 1e-12);
        assert!(one_year > three_months);
    }

    #[test]
    fn test_forward_rate_rejects_empty_window() {
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15))
            .with_forward_curve(usd_3m(), FlatCurve::new(0.012));
        assert!(matches!(
            env.forward_rate(&usd_3m(), date(2015, 9, 17), date(2015, 9, 17), 0.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
        assert!(matches!(
            env.forward_rate(&usd_3m(), date(2015, 12, 17), date(2015, 9, 17), 0.25),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }

    #[test]
    fn test_missing_forward_curve_names_index() {
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15));
        let err = env
            .forward_rate(&usd_3m(), date(2015, 9, 17), date(2015, 12, 17), 0.25)
            .unwrap_err();
        assert!(err.to_string().contains("USD-LIBOR-3M"));
    }

    #[test]
    fn test_fixings_are_keyed_by_date() {
        let id = IborIndexId::new("USD-LIBOR-3M");
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15)).with_fixing(
            id.clone(),
            date(2015, 6, 11),
            0.0028,
        );
        assert_eq!(env.fixing(&id, date(2015, 6, 11)), Some(0.0028));
        assert_eq!(env.fixing(&id, date(2015, 6, 12)), None);
    }

    #[test]
    fn test_volatility_lookup() {
        let id = IborIndexId::new("EUR-EURIBOR-6M");
        let env = ImmutablePricingEnvironment::new(date(2015, 6, 15))
            .with_swaption_volatility(id.clone(), 0.3);
        assert_eq!(
            env.swaption_volatility(&id, date(2016, 6, 15), 5.0).unwrap(),
            0.3
        );
        assert!(env
            .swaption_volatility(&IborIndexId::new("USD-LIBOR-3M"), date(2016, 6, 15), 5.0)
            .is_err());
    }
}
