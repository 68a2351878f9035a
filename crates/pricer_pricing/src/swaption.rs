//! Black-76 swaption pricer.
//!
//! The option is valued on the forward par swap rate:
//!
//! - forward rate S = |PV of the Ibor legs| / PVBP of the fixed leg
//! - strike K = the fixed leg rate
//! - PV = ±annuity × Black(S, K, σ, T), call for a payer, put for a receiver
//!
//! The annuity is the fixed leg PVBP for physical settlement and a
//! rate-dependent cash annuity for cash settlement.

use pricer_core::explain::{CashFlowReportBuilder, ExplainKey, ExplainRow};
use pricer_core::market_data::PricingEnvironment;
use pricer_core::types::{Currency, CurrencyAmount, Date, DayCountConvention, PricingError};
use pricer_models::products::{
    CashSettlementMethod, PaymentPeriod, RatePaymentPeriod, ResolvedSwapLeg, ResolvedSwaption,
    ResolvedSwaptionSettlement, SwapLegType,
};

use crate::black::{black_price, PutCall};
use crate::pricer::ProductPricer;
use crate::swap::DiscountingSwapLegPricer;

const COLUMNS: &[ExplainKey] = &[
    ExplainKey::EntryType,
    ExplainKey::ExpiryDate,
    ExplainKey::SettlementDate,
    ExplainKey::Currency,
    ExplainKey::Index,
    ExplainKey::Notional,
    ExplainKey::StrikeRate,
    ExplainKey::ForwardSwapRate,
    ExplainKey::Volatility,
    ExplainKey::Annuity,
    ExplainKey::ForecastValue,
    ExplainKey::DiscountFactor,
    ExplainKey::PresentValue,
];

/// Everything the Black formula needs, computed once per call.
struct SwaptionValuation {
    currency: Currency,
    notional: f64,
    strike: f64,
    forward: f64,
    volatility: f64,
    annuity: f64,
    settlement_df: f64,
    present_value: f64,
}

/// Prices swaptions with Black-76 on the forward swap rate.
///
/// The underlying must have exactly one fixed leg; the volatility comes
/// from `env.swaption_volatility` for the swaption's index.
#[derive(Clone, Default)]
pub struct BlackSwaptionPricer {
    leg_pricer: DiscountingSwapLegPricer,
}

impl BlackSwaptionPricer {
    /// Creates a pricer that values Ibor legs with `leg_pricer`.
    pub fn new(leg_pricer: DiscountingSwapLegPricer) -> Self {
        Self { leg_pricer }
    }

    /// Forward par rate of the underlying swap.
    pub fn forward_rate(
        &self,
        env: &dyn PricingEnvironment,
        swaption: &ResolvedSwaption,
    ) -> Result<f64, PricingError> {
        let fixed_leg = fixed_leg(swaption)?;
        let pvbp = pvbp(env, fixed_leg)?;
        self.forward_from_pvbp(env, swaption, pvbp)
    }

    fn forward_from_pvbp(
        &self,
        env: &dyn PricingEnvironment,
        swaption: &ResolvedSwaption,
        pvbp: f64,
    ) -> Result<f64, PricingError> {
        let mut ibor_pv = 0.0;
        for leg in swaption.underlying().legs_of_type(SwapLegType::Ibor) {
            ibor_pv += self.leg_pricer.present_value(env, leg)?.amount();
        }
        Ok(ibor_pv.abs() / pvbp)
    }

    fn valuation(
        &self,
        env: &dyn PricingEnvironment,
        swaption: &ResolvedSwaption,
    ) -> Result<SwaptionValuation, PricingError> {
        let currency = swaption.currency();
        let fixed_leg = fixed_leg(swaption)?;
        let strike = fixed_leg.fixed_rate().ok_or_else(|| {
            PricingError::InvalidProduct("fixed leg has no fixed rate".to_string())
        })?;
        let notional = rate_periods(fixed_leg)
            .next()
            .map_or(0.0, |p| p.notional.abs());

        let pvbp = pvbp(env, fixed_leg)?;
        let forward = self.forward_from_pvbp(env, swaption, pvbp)?;

        let settlement_date = swaption.settlement_date();
        let settlement_df = env.discount_factor(currency, settlement_date)?;
        let annuity = match swaption.settlement() {
            ResolvedSwaptionSettlement::Physical => pvbp,
            ResolvedSwaptionSettlement::Cash { method, .. } => {
                notional * cash_annuity(*method, forward, fixed_leg, swaption, settlement_date)
                    * settlement_df
            }
        };

        let underlying = swaption.underlying();
        let tenor = DayCountConvention::ActualActual365
            .year_fraction_dates(underlying.start_date(), underlying.end_date());
        let volatility =
            env.swaption_volatility(swaption.index().id(), swaption.expiry_date(), tenor)?;
        let expiry = env.relative_time(swaption.expiry_date());

        let put_call = if swaption.is_payer() {
            PutCall::Call
        } else {
            PutCall::Put
        };
        let option = black_price(forward, strike, volatility, expiry, put_call);
        let present_value = swaption.long_short().sign() * annuity * option;

        Ok(SwaptionValuation {
            currency,
            notional,
            strike,
            forward,
            volatility,
            annuity,
            settlement_df,
            present_value,
        })
    }
}

fn fixed_leg(swaption: &ResolvedSwaption) -> Result<&ResolvedSwapLeg, PricingError> {
    let mut fixed = swaption.underlying().legs_of_type(SwapLegType::Fixed);
    match (fixed.next(), fixed.next()) {
        (Some(leg), None) => Ok(leg),
        (None, _) => Err(PricingError::InvalidProduct(
            "swaption underlying has no fixed leg".to_string(),
        )),
        (Some(_), Some(_)) => Err(PricingError::InvalidProduct(
            "swaption underlying has more than one fixed leg".to_string(),
        )),
    }
}

fn rate_periods(leg: &ResolvedSwapLeg) -> impl Iterator<Item = &RatePaymentPeriod> {
    leg.payment_periods().iter().filter_map(|p| match p {
        PaymentPeriod::Rate(rate) => Some(rate),
        PaymentPeriod::KnownAmount(_) => None,
    })
}

/// Present value of one unit of rate on the fixed leg, always positive.
fn pvbp(env: &dyn PricingEnvironment, leg: &ResolvedSwapLeg) -> Result<f64, PricingError> {
    let mut total = 0.0;
    for period in rate_periods(leg) {
        let df = env.discount_factor(period.currency, period.payment_date)?;
        let year_fraction: f64 = period.accrual_periods.iter().map(|a| a.year_fraction).sum();
        total += period.notional.abs() * year_fraction * df;
    }
    if total <= 0.0 {
        return Err(PricingError::InvalidProduct(
            "fixed leg has zero PVBP".to_string(),
        ));
    }
    Ok(total)
}

/// Cash annuity per unit notional, before discounting from settlement.
fn cash_annuity(
    method: CashSettlementMethod,
    forward: f64,
    fixed_leg: &ResolvedSwapLeg,
    swaption: &ResolvedSwaption,
    settlement_date: Date,
) -> f64 {
    match method {
        CashSettlementMethod::ParYield => {
            let periods = rate_periods(fixed_leg).count();
            let underlying = swaption.underlying();
            let tenor = DayCountConvention::ActualActual365
                .year_fraction_dates(underlying.start_date(), underlying.end_date());
            let per_year = if tenor > 0.0 {
                (periods as f64 / tenor).round().max(1.0)
            } else {
                1.0
            };
            (1..=periods)
                .map(|i| (1.0 / per_year) / (1.0 + forward / per_year).powi(i as i32))
                .sum()
        }
        CashSettlementMethod::ZeroCouponYield => rate_periods(fixed_leg)
            .map(|period| {
                let year_fraction: f64 =
                    period.accrual_periods.iter().map(|a| a.year_fraction).sum();
                let t = DayCountConvention::ActualActual365
                    .year_fraction_dates(settlement_date, period.payment_date);
                year_fraction * (1.0 + forward).powf(-t)
            })
            .sum(),
    }
}

impl ProductPricer<ResolvedSwaption> for BlackSwaptionPricer {
    fn name(&self) -> &'static str {
        "BlackSwaptionPricer"
    }

    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        swaption: &ResolvedSwaption,
    ) -> Result<CurrencyAmount, PricingError> {
        let valuation = self.valuation(env, swaption)?;
        Ok(CurrencyAmount::new(valuation.currency, valuation.present_value))
    }

    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        swaption: &ResolvedSwaption,
    ) -> Result<CurrencyAmount, PricingError> {
        let valuation = self.valuation(env, swaption)?;
        Ok(CurrencyAmount::new(
            valuation.currency,
            valuation.present_value / valuation.settlement_df,
        ))
    }

    fn explain_columns(&self) -> &'static [ExplainKey] {
        COLUMNS
    }

    fn explain(
        &self,
        env: &dyn PricingEnvironment,
        swaption: &ResolvedSwaption,
        builder: &mut CashFlowReportBuilder,
    ) -> Result<(), PricingError> {
        let v = self.valuation(env, swaption)?;
        builder.add_row(
            ExplainRow::new()
                .with(ExplainKey::EntryType, "Swaption")
                .with(ExplainKey::ExpiryDate, swaption.expiry_date())
                .with(ExplainKey::SettlementDate, swaption.settlement_date())
                .with(ExplainKey::Currency, v.currency)
                .with(ExplainKey::Index, swaption.index().id().to_string())
                .with(ExplainKey::Notional, v.notional)
                .with(ExplainKey::StrikeRate, v.strike)
                .with(ExplainKey::ForwardSwapRate, v.forward)
                .with(ExplainKey::Volatility, v.volatility)
                .with(ExplainKey::Annuity, v.annuity)
                .with(ExplainKey::ForecastValue, v.present_value / v.settlement_df)
                .with(ExplainKey::DiscountFactor, v.settlement_df)
                .with(ExplainKey::PresentValue, v.present_value),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::DiscountingSwapPricer;
    use approx::assert_relative_eq;
    use chrono::{FixedOffset, NaiveTime};
    use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment, MarketDataError};
    use pricer_core::reference_data::ReferenceData;
    use pricer_core::types::{
        AdjustableDate, BusinessDayAdjustment, BusinessDayConvention, HolidayCalendarId,
        IborIndexId, LongShort, PayReceive,
    };
    use pricer_models::products::{
        RateCalculation, RateCalculationSwapLeg, Resolvable, Swap, SwapLeg, Swaption,
        SwaptionSettlement,
    };
    use pricer_models::schedules::{Frequency, PeriodicSchedule};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn schedule(frequency: Frequency) -> PeriodicSchedule {
        PeriodicSchedule::new(
            date(2016, 1, 15),
            date(2021, 1, 15),
            frequency,
            BusinessDayAdjustment::new(
                BusinessDayConvention::ModifiedFollowing,
                HolidayCalendarId::new("USNY"),
            ),
        )
        .unwrap()
    }

    fn underlying(fixed_direction: PayReceive) -> Swap {
        let float_direction = match fixed_direction {
            PayReceive::Pay => PayReceive::Receive,
            PayReceive::Receive => PayReceive::Pay,
        };
        let fixed = RateCalculationSwapLeg::new(
            fixed_direction,
            schedule(Frequency::SemiAnnual),
            Frequency::SemiAnnual,
            0,
            CurrencyAmount::new(Currency::USD, 1_000_000.0),
            RateCalculation::Fixed {
                rate: 0.015,
                day_count: DayCountConvention::Thirty360,
            },
        )
        .unwrap();
        let ibor = RateCalculationSwapLeg::new(
            float_direction,
            schedule(Frequency::Quarterly),
            Frequency::Quarterly,
            0,
            CurrencyAmount::new(Currency::USD, 1_000_000.0),
            RateCalculation::Ibor {
                index: IborIndexId::new("USD-LIBOR-3M"),
                spread: 0.0,
                day_count: DayCountConvention::ActualActual360,
            },
        )
        .unwrap();
        Swap::new(vec![SwapLeg::RateCalculation(fixed), SwapLeg::RateCalculation(ibor)]).unwrap()
    }

    fn swaption(fixed_direction: PayReceive, settlement: SwaptionSettlement) -> ResolvedSwaption {
        Swaption::new(
            LongShort::Long,
            settlement,
            AdjustableDate::unadjusted(date(2016, 1, 13)),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap(),
            underlying(fixed_direction),
        )
        .unwrap()
        .resolve(&ReferenceData::standard())
        .unwrap()
    }

    fn env() -> ImmutablePricingEnvironment {
        ImmutablePricingEnvironment::new(date(2015, 1, 13))
            .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
            .with_forward_curve(IborIndexId::new("USD-LIBOR-3M"), FlatCurve::new(0.015))
            .with_swaption_volatility(IborIndexId::new("USD-LIBOR-3M"), 0.3)
    }

    #[test]
    fn test_payer_receiver_parity() {
        let payer = swaption(PayReceive::Pay, SwaptionSettlement::Physical);
        let receiver = swaption(PayReceive::Receive, SwaptionSettlement::Physical);
        let pricer = BlackSwaptionPricer::default();

        let payer_pv = pricer.present_value(&env(), &payer).unwrap().amount();
        let receiver_pv = pricer.present_value(&env(), &receiver).unwrap().amount();
        let swap_pv = DiscountingSwapPricer::default()
            .present_value(&env(), payer.underlying())
            .unwrap()
            .amount();

        assert!(payer_pv > 0.0 && receiver_pv > 0.0);
        assert_relative_eq!(payer_pv - receiver_pv, swap_pv, epsilon = 1e-6);
    }

    #[test]
    fn test_short_is_negated_long() {
        let long = swaption(PayReceive::Pay, SwaptionSettlement::Physical);
        let short = ResolvedSwaption::new(
            LongShort::Short,
            *long.settlement(),
            long.expiry(),
            long.underlying().clone(),
        )
        .unwrap();
        let pricer = BlackSwaptionPricer::default();
        let long_pv = pricer.present_value(&env(), &long).unwrap();
        let short_pv = pricer.present_value(&env(), &short).unwrap();
        assert_relative_eq!(long_pv.amount(), -short_pv.amount(), epsilon = 1e-9);
    }

    #[test]
    fn test_future_value_undoes_settlement_discounting() {
        let product = swaption(PayReceive::Pay, SwaptionSettlement::Physical);
        let pricer = BlackSwaptionPricer::default();
        let pv = pricer.present_value(&env(), &product).unwrap().amount();
        let fv = pricer.future_value(&env(), &product).unwrap().amount();
        let df = env()
            .discount_factor(Currency::USD, product.settlement_date())
            .unwrap();
        assert_relative_eq!(fv * df, pv, epsilon = 1e-9);
    }

    #[test]
    fn test_cash_settled_close_to_physical() {
        let cash = |method| {
            swaption(
                PayReceive::Pay,
                SwaptionSettlement::Cash {
                    method,
                    settlement_date: AdjustableDate::unadjusted(date(2016, 1, 15)),
                },
            )
        };
        let pricer = BlackSwaptionPricer::default();
        let physical = pricer
            .present_value(&env(), &swaption(PayReceive::Pay, SwaptionSettlement::Physical))
            .unwrap()
            .amount();
        for method in [CashSettlementMethod::ParYield, CashSettlementMethod::ZeroCouponYield] {
            let pv = pricer.present_value(&env(), &cash(method)).unwrap().amount();
            assert!(pv > 0.0);
            assert!((pv - physical).abs() / physical < 0.05, "{method}: {pv} vs {physical}");
        }
    }

    #[test]
    fn test_forward_rate_is_positive() {
        let product = swaption(PayReceive::Pay, SwaptionSettlement::Physical);
        let forward = BlackSwaptionPricer::default()
            .forward_rate(&env(), &product)
            .unwrap();
        assert!(forward > 0.01 && forward < 0.02);
    }

    #[test]
    fn test_missing_volatility() {
        let env = ImmutablePricingEnvironment::new(date(2015, 1, 13))
            .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
            .with_forward_curve(IborIndexId::new("USD-LIBOR-3M"), FlatCurve::new(0.015));
        let err = BlackSwaptionPricer::default()
            .present_value(&env, &swaption(PayReceive::Pay, SwaptionSettlement::Physical))
            .unwrap_err();
        assert!(matches!(
            err,
            PricingError::MarketData(MarketDataError::MissingVolatility { .. })
        ));
    }

    #[test]
    fn test_explain_single_row() {
        let pricer = BlackSwaptionPricer::default();
        let mut builder = CashFlowReportBuilder::new(pricer.explain_columns());
        pricer
            .explain(
                &env(),
                &swaption(PayReceive::Receive, SwaptionSettlement::Physical),
                &mut builder,
            )
            .unwrap();
        assert_eq!(builder.row_count(), 1);
    }
}
