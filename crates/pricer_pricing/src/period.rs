//! Payment period pricers.
//!
//! A swap leg is a list of [`PaymentPeriod`]s. Each period variant has its
//! own discounting pricer, and [`DispatchingPaymentPeriodPricer`] routes a
//! period to the right one.

use std::sync::Arc;

use pricer_core::explain::{ExplainKey, ExplainRow};
use pricer_core::market_data::{MarketDataError, PricingEnvironment};
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::products::{
    IborRateComputation, KnownAmountPaymentPeriod, PaymentPeriod, RateComputation,
    RatePaymentPeriod,
};

/// Prices a single payment period.
///
/// The payment date must not be before `env.valuation_date()`; for a past
/// date the result is undefined but deterministic.
pub trait PaymentPeriodPricer<P>: Send + Sync {
    /// Value discounted to the valuation date.
    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &P,
    ) -> Result<CurrencyAmount, PricingError>;

    /// Value on the payment date.
    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &P,
    ) -> Result<CurrencyAmount, PricingError>;

    /// Explain rows for the period, contiguous and in date order.
    fn explain_rows(
        &self,
        env: &dyn PricingEnvironment,
        period: &P,
    ) -> Result<Vec<ExplainRow>, PricingError>;
}

/// Rate used for one Ibor computation.
///
/// A fixing before the valuation date must be known. On the valuation date
/// a known fixing is used, otherwise the forward curve over the resolved
/// effective to maturity window.
pub(crate) fn ibor_rate(
    env: &dyn PricingEnvironment,
    computation: &IborRateComputation,
) -> Result<f64, PricingError> {
    let valuation_date = env.valuation_date();
    let fixing = env.fixing(computation.index.id(), computation.fixing_date);
    if computation.fixing_date < valuation_date {
        return fixing.ok_or_else(|| {
            MarketDataError::MissingFixing {
                index: computation.index.id().to_string(),
                date: computation.fixing_date,
            }
            .into()
        });
    }
    match fixing {
        Some(rate) if computation.fixing_date == valuation_date => Ok(rate),
        _ => Ok(env.forward_rate(
            computation.index.id(),
            computation.effective_date,
            computation.maturity_date,
            computation.year_fraction,
        )?),
    }
}

/// Discounting pricer for interest-accruing periods.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountingRatePaymentPeriodPricer;

impl DiscountingRatePaymentPeriodPricer {
    /// Observed rate and undiscounted value of each accrual period.
    fn accrual_values(
        env: &dyn PricingEnvironment,
        period: &RatePaymentPeriod,
    ) -> Result<Vec<(f64, f64)>, PricingError> {
        period
            .accrual_periods
            .iter()
            .map(|accrual| {
                let rate = match &accrual.rate_computation {
                    RateComputation::Fixed(rate) => *rate,
                    RateComputation::Ibor(computation) => ibor_rate(env, computation)?,
                };
                let value = period.notional * (rate + accrual.spread) * accrual.year_fraction;
                Ok((rate, value))
            })
            .collect()
    }
}

impl PaymentPeriodPricer<RatePaymentPeriod> for DiscountingRatePaymentPeriodPricer {
    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &RatePaymentPeriod,
    ) -> Result<CurrencyAmount, PricingError> {
        let df = env.discount_factor(period.currency, period.payment_date)?;
        Ok(self.future_value(env, period)?.multiplied_by(df))
    }

    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &RatePaymentPeriod,
    ) -> Result<CurrencyAmount, PricingError> {
        let total: f64 = Self::accrual_values(env, period)?
            .iter()
            .map(|(_, value)| value)
            .sum();
        Ok(CurrencyAmount::new(period.currency, total))
    }

    fn explain_rows(
        &self,
        env: &dyn PricingEnvironment,
        period: &RatePaymentPeriod,
    ) -> Result<Vec<ExplainRow>, PricingError> {
        let df = env.discount_factor(period.currency, period.payment_date)?;
        let values = Self::accrual_values(env, period)?;
        let rows = period
            .accrual_periods
            .iter()
            .zip(values)
            .map(|(accrual, (rate, value))| {
                let row = ExplainRow::new()
                    .with(ExplainKey::EntryType, "Accrual")
                    .with(ExplainKey::PaymentDate, period.payment_date)
                    .with(ExplainKey::StartDate, accrual.start_date)
                    .with(ExplainKey::EndDate, accrual.end_date)
                    .with(ExplainKey::AccrualYearFraction, accrual.year_fraction)
                    .with(ExplainKey::Notional, period.notional)
                    .with(ExplainKey::Currency, period.currency)
                    .with(ExplainKey::ForecastValue, value)
                    .with(ExplainKey::DiscountFactor, df)
                    .with(ExplainKey::PresentValue, value * df);
                match &accrual.rate_computation {
                    RateComputation::Fixed(_) => row
                        .with(ExplainKey::FixedRate, rate)
                        .with(ExplainKey::ForecastRate, rate),
                    RateComputation::Ibor(computation) => row
                        .with(ExplainKey::FixingDate, computation.fixing_date)
                        .with(ExplainKey::Index, computation.index.id().to_string())
                        .with(ExplainKey::ForecastRate, rate)
                        .with(ExplainKey::Spread, accrual.spread),
                }
            })
            .collect();
        Ok(rows)
    }
}

/// Discounting pricer for known amounts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountingKnownAmountPaymentPeriodPricer;

impl PaymentPeriodPricer<KnownAmountPaymentPeriod> for DiscountingKnownAmountPaymentPeriodPricer {
    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &KnownAmountPaymentPeriod,
    ) -> Result<CurrencyAmount, PricingError> {
        let df = env.discount_factor(period.currency, period.payment_date)?;
        Ok(CurrencyAmount::new(period.currency, period.amount * df))
    }

    fn future_value(
        &self,
        _env: &dyn PricingEnvironment,
        period: &KnownAmountPaymentPeriod,
    ) -> Result<CurrencyAmount, PricingError> {
        Ok(CurrencyAmount::new(period.currency, period.amount))
    }

    fn explain_rows(
        &self,
        env: &dyn PricingEnvironment,
        period: &KnownAmountPaymentPeriod,
    ) -> Result<Vec<ExplainRow>, PricingError> {
        let df = env.discount_factor(period.currency, period.payment_date)?;
        Ok(vec![ExplainRow::new()
            .with(ExplainKey::EntryType, "Known Amount")
            .with(ExplainKey::PaymentDate, period.payment_date)
            .with(ExplainKey::StartDate, period.start_date)
            .with(ExplainKey::EndDate, period.end_date)
            .with(ExplainKey::Currency, period.currency)
            .with(ExplainKey::ForecastValue, period.amount)
            .with(ExplainKey::DiscountFactor, df)
            .with(ExplainKey::PresentValue, period.amount * df)])
    }
}

/// Routes each [`PaymentPeriod`] variant to its pricer.
#[derive(Clone)]
pub struct DispatchingPaymentPeriodPricer {
    rate: Arc<dyn PaymentPeriodPricer<RatePaymentPeriod>>,
    known_amount: Arc<dyn PaymentPeriodPricer<KnownAmountPaymentPeriod>>,
}

impl DispatchingPaymentPeriodPricer {
    /// Creates a dispatcher over the given period pricers.
    pub fn new(
        rate: Arc<dyn PaymentPeriodPricer<RatePaymentPeriod>>,
        known_amount: Arc<dyn PaymentPeriodPricer<KnownAmountPaymentPeriod>>,
    ) -> Self {
        Self { rate, known_amount }
    }
}

impl Default for DispatchingPaymentPeriodPricer {
    fn default() -> Self {
        Self::new(
            Arc::new(DiscountingRatePaymentPeriodPricer),
            Arc::new(DiscountingKnownAmountPaymentPeriodPricer),
        )
    }
}

impl PaymentPeriodPricer<PaymentPeriod> for DispatchingPaymentPeriodPricer {
    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &PaymentPeriod,
    ) -> Result<CurrencyAmount, PricingError> {
        match period {
            PaymentPeriod::Rate(p) => self.rate.present_value(env, p),
            PaymentPeriod::KnownAmount(p) => self.known_amount.present_value(env, p),
        }
    }

    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        period: &PaymentPeriod,
    ) -> Result<CurrencyAmount, PricingError> {
        match period {
            PaymentPeriod::Rate(p) => self.rate.future_value(env, p),
            PaymentPeriod::KnownAmount(p) => self.known_amount.future_value(env, p),
        }
    }

    fn explain_rows(
        &self,
        env: &dyn PricingEnvironment,
        period: &PaymentPeriod,
    ) -> Result<Vec<ExplainRow>, PricingError> {
        match period {
            PaymentPeriod::Rate(p) => self.rate.explain_rows(env, p),
            PaymentPeriod::KnownAmount(p) => self.known_amount.explain_rows(env, p),
        }
    }
}
