//! Swap leg and swap pricers.

use pricer_core::explain::{CashFlowReportBuilder, ExplainKey, ExplainRow};
use pricer_core::market_data::PricingEnvironment;
use pricer_core::types::{CurrencyAmount, Date, PricingError};
use pricer_models::products::{ResolvedSwap, ResolvedSwapLeg};

use crate::period::{DispatchingPaymentPeriodPricer, PaymentPeriodPricer};
use crate::pricer::ProductPricer;

/// Explain columns shared by legs and swaps.
pub const SWAP_COLUMNS: &[ExplainKey] = &[
    ExplainKey::EntryType,
    ExplainKey::LegType,
    ExplainKey::PayReceive,
    ExplainKey::PaymentDate,
    ExplainKey::StartDate,
    ExplainKey::EndDate,
    ExplainKey::FixingDate,
    ExplainKey::Index,
    ExplainKey::AccrualYearFraction,
    ExplainKey::FixedRate,
    ExplainKey::ForecastRate,
    ExplainKey::Spread,
    ExplainKey::Notional,
    ExplainKey::Currency,
    ExplainKey::ForecastValue,
    ExplainKey::DiscountFactor,
    ExplainKey::PresentValue,
];

/// The rows of one payment period, keyed by its payment date.
type PeriodRows = (Date, Vec<ExplainRow>);

/// Prices a leg as the sum of its payment periods.
#[derive(Clone, Default)]
pub struct DiscountingSwapLegPricer {
    period_pricer: DispatchingPaymentPeriodPricer,
}

impl DiscountingSwapLegPricer {
    /// Creates a leg pricer over a period pricer.
    pub fn new(period_pricer: DispatchingPaymentPeriodPricer) -> Self {
        Self { period_pricer }
    }

    fn period_rows(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ResolvedSwapLeg,
    ) -> Result<Vec<PeriodRows>, PricingError> {
        leg.payment_periods()
            .iter()
            .map(|period| {
                let rows = self
                    .period_pricer
                    .explain_rows(env, period)?
                    .into_iter()
                    .map(|row| {
                        row.with(ExplainKey::LegType, leg.leg_type().to_string())
                            .with(ExplainKey::PayReceive, leg.pay_receive().to_string())
                    })
                    .collect();
                Ok((period.payment_date(), rows))
            })
            .collect()
    }
}

impl ProductPricer<ResolvedSwapLeg> for DiscountingSwapLegPricer {
    fn name(&self) -> &'static str {
        "DiscountingSwapLegPricer"
    }

    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ResolvedSwapLeg,
    ) -> Result<CurrencyAmount, PricingError> {
        leg.payment_periods()
            .iter()
            .try_fold(CurrencyAmount::zero(leg.currency()), |total, period| {
                Ok(total.plus(self.period_pricer.present_value(env, period)?)?)
            })
    }

    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ResolvedSwapLeg,
    ) -> Result<CurrencyAmount, PricingError> {
        leg.payment_periods()
            .iter()
            .try_fold(CurrencyAmount::zero(leg.currency()), |total, period| {
                Ok(total.plus(self.period_pricer.future_value(env, period)?)?)
            })
    }

    fn explain_columns(&self) -> &'static [ExplainKey] {
        SWAP_COLUMNS
    }

    fn explain(
        &self,
        env: &dyn PricingEnvironment,
        leg: &ResolvedSwapLeg,
        builder: &mut CashFlowReportBuilder,
    ) -> Result<(), PricingError> {
        for (_, rows) in self.period_rows(env, leg)? {
            builder.add_rows(rows)?;
        }
        Ok(())
    }
}

/// Prices a swap as the sum of its legs.
///
/// Present and future value need a single-currency swap; a cross-currency
/// swap fails with `PricingError::CurrencyMismatch`. Explain works for any swap.
#[derive(Clone, Default)]
pub struct DiscountingSwapPricer {
    leg_pricer: DiscountingSwapLegPricer,
}

impl DiscountingSwapPricer {
    /// Creates a swap pricer over a leg pricer.
    pub fn new(leg_pricer: DiscountingSwapLegPricer) -> Self {
        Self { leg_pricer }
    }

    /// The leg pricer used for each leg.
    pub fn leg_pricer(&self) -> &DiscountingSwapLegPricer {
        &self.leg_pricer
    }

    fn sum_legs(
        &self,
        swap: &ResolvedSwap,
        value: impl Fn(&ResolvedSwapLeg) -> Result<CurrencyAmount, PricingError>,
    ) -> Result<CurrencyAmount, PricingError> {
        let (first, rest) = match swap.legs() {
            [first, rest @ ..] => (first, rest),
            [] => return Err(PricingError::InvalidProduct("swap has no legs".to_string())),
        };
        rest.iter()
            .try_fold(value(first)?, |total, leg| Ok(total.plus(value(leg)?)?))
    }
}

impl ProductPricer<ResolvedSwap> for DiscountingSwapPricer {
    fn name(&self) -> &'static str {
        "DiscountingSwapPricer"
    }

    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ResolvedSwap,
    ) -> Result<CurrencyAmount, PricingError> {
        self.sum_legs(swap, |leg| self.leg_pricer.present_value(env, leg))
    }

    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ResolvedSwap,
    ) -> Result<CurrencyAmount, PricingError> {
        self.sum_legs(swap, |leg| self.leg_pricer.future_value(env, leg))
    }

    fn explain_columns(&self) -> &'static [ExplainKey] {
        SWAP_COLUMNS
    }

    fn explain(
        &self,
        env: &dyn PricingEnvironment,
        swap: &ResolvedSwap,
        builder: &mut CashFlowReportBuilder,
    ) -> Result<(), PricingError> {
        let mut groups = Vec::new();
        for leg in swap.legs() {
            groups.extend(self.leg_pricer.period_rows(env, leg)?);
        }
        // stable: periods paying on the same date keep leg order
        groups.sort_by_key(|(date, _)| *date);
        for (_, rows) in groups {
            builder.add_rows(rows)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::explain::ExplainValue;
    use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment};
    use pricer_core::reference_data::ReferenceData;
    use pricer_core::types::{
        BusinessDayAdjustment, Currency, DayCountConvention, IborIndexId, PayReceive,
    };
    use pricer_models::products::{
        KnownAmountSwapLeg, RateCalculation, RateCalculationSwapLeg, Resolvable, Swap, SwapLeg,
    };
    use pricer_models::schedules::{Frequency, PeriodicSchedule};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn schedule(frequency: Frequency) -> PeriodicSchedule {
        PeriodicSchedule::new(
            date(2016, 1, 15),
            date(2018, 1, 15),
            frequency,
            BusinessDayAdjustment::none(),
        )
        .unwrap()
    }

    fn rate_leg(pay_receive: PayReceive, currency: Currency, calculation: RateCalculation) -> SwapLeg {
        let frequency = match calculation {
            RateCalculation::Fixed { .. } => Frequency::SemiAnnual,
            RateCalculation::Ibor { .. } => Frequency::Quarterly,
        };
        SwapLeg::RateCalculation(
            RateCalculationSwapLeg::new(
                pay_receive,
                schedule(frequency),
                frequency,
                0,
                CurrencyAmount::new(currency, 1_000_000.0),
                calculation,
            )
            .unwrap(),
        )
    }

    fn fixed(pay_receive: PayReceive) -> SwapLeg {
        rate_leg(
            pay_receive,
            Currency::USD,
            RateCalculation::Fixed {
                rate: 0.015,
                day_count: DayCountConvention::Thirty360,
            },
        )
    }

    fn ibor() -> SwapLeg {
        rate_leg(
            PayReceive::Receive,
            Currency::USD,
            RateCalculation::Ibor {
                index: IborIndexId::new("USD-LIBOR-3M"),
                spread: 0.0,
                day_count: DayCountConvention::ActualActual360,
            },
        )
    }

    fn resolve(legs: Vec<SwapLeg>) -> ResolvedSwap {
        Swap::new(legs)
            .unwrap()
            .resolve(&ReferenceData::standard())
            .unwrap()
    }

    fn env() -> ImmutablePricingEnvironment {
        ImmutablePricingEnvironment::new(date(2016, 1, 4))
            .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
            .with_discount_curve(Currency::EUR, FlatCurve::new(0.005))
            .with_forward_curve(IborIndexId::new("USD-LIBOR-3M"), FlatCurve::new(0.012))
    }

    #[test]
    fn test_swap_pv_is_sum_of_period_pvs() {
        let swap = resolve(vec![fixed(PayReceive::Pay), ibor()]);
        let period_pricer = DispatchingPaymentPeriodPricer::default();
        let expected: f64 = swap
            .legs()
            .iter()
            .flat_map(|leg| leg.payment_periods())
            .map(|p| period_pricer.present_value(&env(), p).unwrap().amount())
            .sum();

        let pv = DiscountingSwapPricer::default()
            .present_value(&env(), &swap)
            .unwrap();
        assert_relative_eq!(pv.amount(), expected, epsilon = 1e-9);
        assert_eq!(pv.currency(), Currency::USD);
    }

    #[test]
    fn test_pay_leg_is_negative() {
        let swap = resolve(vec![fixed(PayReceive::Pay)]);
        let pv = DiscountingSwapLegPricer::default()
            .present_value(&env(), &swap.legs()[0])
            .unwrap();
        assert!(pv.amount() < 0.0);
    }

    #[test]
    fn test_future_value_is_undiscounted_sum() {
        let swap = resolve(vec![fixed(PayReceive::Receive)]);
        let fv = DiscountingSwapPricer::default()
            .future_value(&env(), &swap)
            .unwrap();
        // four semi-annual 30/360 coupons of 1.5% on 1m
        assert_relative_eq!(fv.amount(), 30_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_cross_currency_value_fails() {
        let eur = rate_leg(
            PayReceive::Receive,
            Currency::EUR,
            RateCalculation::Fixed {
                rate: 0.01,
                day_count: DayCountConvention::Thirty360,
            },
        );
        let swap = resolve(vec![fixed(PayReceive::Pay), eur]);
        let err = DiscountingSwapPricer::default()
            .present_value(&env(), &swap)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::CurrencyMismatch {
                expected: Currency::USD,
                found: Currency::EUR
            }
        );

        let pricer = DiscountingSwapPricer::default();
        let mut builder = CashFlowReportBuilder::new(pricer.explain_columns());
        pricer.explain(&env(), &swap, &mut builder).unwrap();
        assert_eq!(builder.row_count(), 8);
    }

    #[test]
    fn test_explain_rows_are_ordered_and_grouped() {
        let swap = resolve(vec![fixed(PayReceive::Pay), ibor()]);
        let pricer = DiscountingSwapPricer::default();
        let mut builder = CashFlowReportBuilder::new(pricer.explain_columns());
        pricer.explain(&env(), &swap, &mut builder).unwrap();
        let report = builder.build(env().valuation_date(), chrono::Utc::now());

        // 4 fixed periods + 8 ibor periods, one accrual each
        assert_eq!(report.row_count(), 12);

        let payment_dates: Vec<Date> = (0..report.row_count())
            .map(|row| match report.value(row, ExplainKey::PaymentDate) {
                Some(ExplainValue::Date(d)) => *d,
                other => panic!("unexpected payment date cell {:?}", other),
            })
            .collect();
        let mut sorted = payment_dates.clone();
        sorted.sort();
        assert_eq!(payment_dates, sorted);

        assert_eq!(
            report.value(0, ExplainKey::LegType).unwrap().to_string(),
            "Ibor"
        );
        // on a shared payment date the fixed leg comes first
        let shared = payment_dates
            .iter()
            .position(|d| *d == date(2016, 7, 15))
            .unwrap();
        assert_eq!(
            report.value(shared, ExplainKey::LegType).unwrap().to_string(),
            "Fixed"
        );

        let total: f64 = (0..report.row_count())
            .filter_map(|row| report.value(row, ExplainKey::PresentValue)?.as_f64())
            .sum();
        let pv = pricer.present_value(&env(), &swap).unwrap();
        assert_relative_eq!(total, pv.amount(), epsilon = 1e-9);
    }

    #[test]
    fn test_known_amount_leg() {
        let known = SwapLeg::KnownAmount(
            KnownAmountSwapLeg::new(
                PayReceive::Receive,
                schedule(Frequency::Annual),
                CurrencyAmount::new(Currency::USD, 1_000.0),
            )
            .unwrap(),
        );
        let swap = resolve(vec![known]);
        let fv = DiscountingSwapPricer::default()
            .future_value(&env(), &swap)
            .unwrap();
        assert_eq!(fv, CurrencyAmount::new(Currency::USD, 2_000.0));
    }
}
