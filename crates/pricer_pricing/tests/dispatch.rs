//! Registry dispatch across product variants.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use pricer_core::explain::{CashFlowReportBuilder, ExplainKey, ExplainRow};
use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment, PricingEnvironment};
use pricer_core::reference_data::ReferenceData;
use pricer_core::types::{
    BusinessDayAdjustment, Currency, CurrencyAmount, Date, DayCountConvention, IborIndexId,
    PayReceive, PricingError, SecurityId,
};
use pricer_models::products::{
    EquityFuture, Product, ProductKind, RateCalculation, RateCalculationSwapLeg, Resolvable,
    ResolvedProduct, ResolvedSwap, Swap, SwapLeg,
};
use pricer_models::schedules::{Frequency, PeriodicSchedule};
use pricer_pricing::{PricerRegistry, ProductPricer, SWAP_COLUMNS};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// Counts calls and returns a fixed amount.
struct RecordingPricer {
    calls: Arc<AtomicUsize>,
    amount: f64,
}

impl RecordingPricer {
    fn new(amount: f64) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                amount,
            },
            calls,
        )
    }
}

impl<P> ProductPricer<P> for RecordingPricer {
    fn name(&self) -> &'static str {
        "RecordingPricer"
    }

    fn present_value(
        &self,
        _env: &dyn PricingEnvironment,
        _product: &P,
    ) -> Result<CurrencyAmount, PricingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CurrencyAmount::new(Currency::USD, self.amount))
    }

    fn future_value(
        &self,
        _env: &dyn PricingEnvironment,
        _product: &P,
    ) -> Result<CurrencyAmount, PricingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CurrencyAmount::new(Currency::USD, self.amount))
    }

    fn explain_columns(&self) -> &'static [ExplainKey] {
        &[ExplainKey::EntryType]
    }

    fn explain(
        &self,
        _env: &dyn PricingEnvironment,
        _product: &P,
        builder: &mut CashFlowReportBuilder,
    ) -> Result<(), PricingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        builder.add_row(ExplainRow::new().with(ExplainKey::EntryType, "Recorded"))?;
        Ok(())
    }
}

fn future(settlement: Date) -> EquityFuture {
    EquityFuture::new(
        SecurityId::new("OG-Future"),
        settlement,
        settlement,
        100.0,
        CurrencyAmount::new(Currency::USD, 250.0),
    )
    .unwrap()
}

fn fixed_swap(start: Date, end: Date) -> ResolvedSwap {
    let leg = RateCalculationSwapLeg::new(
        PayReceive::Receive,
        PeriodicSchedule::new(start, end, Frequency::Annual, BusinessDayAdjustment::none())
            .unwrap(),
        Frequency::Annual,
        0,
        CurrencyAmount::new(Currency::USD, 1_000_000.0),
        RateCalculation::Fixed {
            rate: 0.02,
            day_count: DayCountConvention::Thirty360,
        },
    )
    .unwrap();
    Swap::new(vec![SwapLeg::RateCalculation(leg)])
        .unwrap()
        .resolve(&ReferenceData::standard())
        .unwrap()
}

fn env(valuation_date: Date) -> ImmutablePricingEnvironment {
    ImmutablePricingEnvironment::new(valuation_date)
        .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
        .with_forward_curve(IborIndexId::new("USD-LIBOR-3M"), FlatCurve::new(0.012))
        .with_equity_price(SecurityId::new("OG-Future"), 101.0)
}

#[test]
fn test_dispatch_invokes_only_the_matching_pricer() {
    let (future_pricer, future_calls) = RecordingPricer::new(1.0);
    let (swap_pricer, swap_calls) = RecordingPricer::new(2.0);
    let registry = PricerRegistry::empty()
        .with_equity_future_pricer(future_pricer)
        .with_swap_pricer(swap_pricer);
    let env = env(date(2016, 1, 4));

    let swap = ResolvedProduct::Swap(fixed_swap(date(2016, 1, 15), date(2018, 1, 15)));
    let pv = registry.present_value(&env, &swap).unwrap();
    let fv = registry.future_value(&env, &swap).unwrap();

    assert_eq!(pv.amount(), 2.0);
    assert_eq!(fv.amount(), 2.0);
    assert_eq!(swap_calls.load(Ordering::SeqCst), 2);
    assert_eq!(future_calls.load(Ordering::SeqCst), 0);

    let future = ResolvedProduct::EquityFuture(future(date(2016, 3, 18)));
    assert_eq!(registry.present_value(&env, &future).unwrap().amount(), 1.0);
    assert_eq!(future_calls.load(Ordering::SeqCst), 1);
    assert_eq!(swap_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unregistered_variant_is_unsupported() {
    let (swap_pricer, _) = RecordingPricer::new(2.0);
    let registry = PricerRegistry::empty().with_swap_pricer(swap_pricer);
    let env = env(date(2016, 1, 4));
    let future = ResolvedProduct::EquityFuture(future(date(2016, 3, 18)));

    assert!(!registry.supports(ProductKind::EquityFuture));
    for result in [
        registry.present_value(&env, &future).map(|_| ()),
        registry.future_value(&env, &future).map(|_| ()),
        registry.explain(&env, &future).map(|_| ()),
    ] {
        assert_eq!(
            result.unwrap_err(),
            PricingError::UnsupportedProduct {
                product: "EquityFuture".to_string()
            }
        );
    }
}

#[test]
fn test_shared_registry_across_threads() {
    let registry = Arc::new(PricerRegistry::standard());
    let env = Arc::new(env(date(2016, 1, 4)));
    let swap = Arc::new(ResolvedProduct::Swap(fixed_swap(
        date(2016, 1, 15),
        date(2021, 1, 15),
    )));
    let expected = registry.present_value(env.as_ref(), &swap).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let env = Arc::clone(&env);
            let swap = Arc::clone(&swap);
            thread::spawn(move || registry.present_value(env.as_ref(), &swap).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_batch_keeps_input_order() {
    let registry = PricerRegistry::standard();
    let env = env(date(2016, 1, 4));
    let products = vec![
        ResolvedProduct::EquityFuture(future(date(2016, 3, 18))),
        ResolvedProduct::Swap(fixed_swap(date(2016, 1, 15), date(2018, 1, 15))),
        ResolvedProduct::EquityFuture(future(date(2016, 6, 17))),
    ];

    let results = registry.present_values(&env, &products);
    assert_eq!(results.len(), 3);
    for (product, result) in products.iter().zip(&results) {
        assert_eq!(
            result.as_ref().unwrap(),
            &registry.present_value(&env, product).unwrap()
        );
    }
}

#[test]
fn test_past_dated_products_do_not_panic() {
    let registry = PricerRegistry::standard();
    let env = env(date(2020, 6, 1));
    let products = [
        ResolvedProduct::EquityFuture(future(date(2016, 3, 18))),
        ResolvedProduct::Swap(fixed_swap(date(2016, 1, 15), date(2018, 1, 15))),
    ];
    for product in &products {
        let pv = registry.present_value(&env, product).unwrap();
        assert!(pv.amount().is_finite());
        registry.explain(&env, product).unwrap();
    }
}

#[test]
fn test_explain_report_carries_valuation_context() {
    let registry = PricerRegistry::standard();
    let env = env(date(2016, 1, 4));
    let run_instant = Utc.with_ymd_and_hms(2016, 1, 4, 18, 30, 0).unwrap();
    let product = Product::from(Swap::new(vec![SwapLeg::RateCalculation(
        RateCalculationSwapLeg::new(
            PayReceive::Pay,
            PeriodicSchedule::new(
                date(2016, 1, 15),
                date(2017, 1, 15),
                Frequency::Quarterly,
                BusinessDayAdjustment::none(),
            )
            .unwrap(),
            Frequency::Quarterly,
            0,
            CurrencyAmount::new(Currency::USD, 1_000_000.0),
            RateCalculation::Ibor {
                index: IborIndexId::new("USD-LIBOR-3M"),
                spread: 0.0,
                day_count: DayCountConvention::ActualActual360,
            },
        )
        .unwrap(),
    )])
    .unwrap());
    let resolved = product.resolve(&ReferenceData::standard()).unwrap();

    let report = registry.explain_at(&env, &resolved, run_instant).unwrap();

    assert_eq!(report.valuation_date(), date(2016, 1, 4));
    assert_eq!(report.run_instant(), run_instant);
    assert_eq!(report.column_keys(), SWAP_COLUMNS);
    assert_eq!(report.column_headers().len(), report.column_count());
    assert_eq!(report.row_count(), 4);
    assert!(report
        .data()
        .iter()
        .all(|row| row.len() == report.column_count()));
}
