//! Equity future pricer.

use pricer_core::explain::{CashFlowReportBuilder, ExplainKey, ExplainRow};
use pricer_core::market_data::PricingEnvironment;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::products::EquityFuture;

use crate::pricer::ProductPricer;

const COLUMNS: &[ExplainKey] = &[
    ExplainKey::EntryType,
    ExplainKey::ExpiryDate,
    ExplainKey::SettlementDate,
    ExplainKey::Currency,
    ExplainKey::ForwardPrice,
    ExplainKey::StrikePrice,
    ExplainKey::UnitAmount,
    ExplainKey::ForecastValue,
    ExplainKey::DiscountFactor,
    ExplainKey::PresentValue,
];

/// Values an equity future as `(F - K) × unit amount`, discounted from settlement.
///
/// `F` is the underlying's quoted price in the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountingEquityFuturePricer;

impl ProductPricer<EquityFuture> for DiscountingEquityFuturePricer {
    fn name(&self) -> &'static str {
        "DiscountingEquityFuturePricer"
    }

    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        product: &EquityFuture,
    ) -> Result<CurrencyAmount, PricingError> {
        let df = env.discount_factor(product.currency(), product.settlement_date())?;
        Ok(self.future_value(env, product)?.multiplied_by(df))
    }

    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        product: &EquityFuture,
    ) -> Result<CurrencyAmount, PricingError> {
        let forward = env.equity_price(product.underlying())?;
        Ok(product
            .unit_amount()
            .multiplied_by(forward - product.strike_price()))
    }

    fn explain_columns(&self) -> &'static [ExplainKey] {
        COLUMNS
    }

    fn explain(
        &self,
        env: &dyn PricingEnvironment,
        product: &EquityFuture,
        builder: &mut CashFlowReportBuilder,
    ) -> Result<(), PricingError> {
        let forward = env.equity_price(product.underlying())?;
        let fv = self.future_value(env, product)?;
        let df = env.discount_factor(product.currency(), product.settlement_date())?;
        builder.add_row(
            ExplainRow::new()
                .with(ExplainKey::EntryType, "Future")
                .with(ExplainKey::ExpiryDate, product.expiration_date())
                .with(ExplainKey::SettlementDate, product.settlement_date())
                .with(ExplainKey::Currency, product.currency())
                .with(ExplainKey::ForwardPrice, forward)
                .with(ExplainKey::StrikePrice, product.strike_price())
                .with(ExplainKey::UnitAmount, product.unit_amount())
                .with(ExplainKey::ForecastValue, fv.amount())
                .with(ExplainKey::DiscountFactor, df)
                .with(ExplainKey::PresentValue, fv.amount() * df),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment, MarketDataError};
    use pricer_core::types::{Currency, Date, SecurityId};

    fn future() -> EquityFuture {
        EquityFuture::new(
            SecurityId::new("OG-Future"),
            Date::from_ymd(2015, 6, 15).unwrap(),
            Date::from_ymd(2015, 6, 17).unwrap(),
            100.0,
            CurrencyAmount::new(Currency::USD, 250.0),
        )
        .unwrap()
    }

    fn env() -> ImmutablePricingEnvironment {
        ImmutablePricingEnvironment::new(Date::from_ymd(2015, 6, 1).unwrap())
            .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
            .with_equity_price(SecurityId::new("OG-Future"), 102.0)
    }

    #[test]
    fn test_future_value() {
        let fv = DiscountingEquityFuturePricer
            .future_value(&env(), &future())
            .unwrap();
        assert_eq!(fv, CurrencyAmount::new(Currency::USD, 500.0));
    }

    #[test]
    fn test_present_value_is_discounted() {
        let pv = DiscountingEquityFuturePricer
            .present_value(&env(), &future())
            .unwrap();
        let t = 16.0_f64 / 365.0;
        assert_relative_eq!(pv.amount(), 500.0 * (-0.01 * t).exp(), epsilon = 1e-9);
        assert_eq!(pv.currency(), Currency::USD);
    }

    #[test]
    fn test_missing_price() {
        let env = ImmutablePricingEnvironment::new(Date::from_ymd(2015, 6, 1).unwrap())
            .with_discount_curve(Currency::USD, FlatCurve::new(0.01));
        let err = DiscountingEquityFuturePricer
            .future_value(&env, &future())
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::MarketData(MarketDataError::MissingEquityPrice { .. })
        ));
    }

    #[test]
    fn test_explain_single_row() {
        let pricer = DiscountingEquityFuturePricer;
        let mut builder = CashFlowReportBuilder::new(pricer.explain_columns());
        pricer.explain(&env(), &future(), &mut builder).unwrap();
        assert_eq!(builder.row_count(), 1);
    }
}
