//! Benchmarks for pricer_pricing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment};
use pricer_core::reference_data::ReferenceData;
use pricer_core::types::{
    BusinessDayAdjustment, Currency, CurrencyAmount, Date, DayCountConvention, IborIndexId,
    PayReceive,
};
use pricer_models::products::{
    RateCalculation, RateCalculationSwapLeg, Resolvable, ResolvedProduct, Swap, SwapLeg,
};
use pricer_models::schedules::{Frequency, PeriodicSchedule};
use pricer_pricing::PricerRegistry;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn leg(pay_receive: PayReceive, frequency: Frequency, years: i32, calculation: RateCalculation) -> SwapLeg {
    SwapLeg::RateCalculation(
        RateCalculationSwapLeg::new(
            pay_receive,
            PeriodicSchedule::new(
                date(2016, 1, 15),
                date(2016 + years, 1, 15),
                frequency,
                BusinessDayAdjustment::none(),
            )
            .unwrap(),
            frequency,
            0,
            CurrencyAmount::new(Currency::USD, 1_000_000.0),
            calculation,
        )
        .unwrap(),
    )
}

/// Fixed-vs-Ibor swap of the given tenor in years.
fn swap(years: i32) -> ResolvedProduct {
    let legs = vec![
        leg(
            PayReceive::Pay,
            Frequency::SemiAnnual,
            years,
            RateCalculation::Fixed {
                rate: 0.015,
                day_count: DayCountConvention::Thirty360,
            },
        ),
        leg(
            PayReceive::Receive,
            Frequency::Quarterly,
            years,
            RateCalculation::Ibor {
                index: IborIndexId::new("USD-LIBOR-3M"),
                spread: 0.0,
                day_count: DayCountConvention::ActualActual360,
            },
        ),
    ];
    ResolvedProduct::Swap(
        Swap::new(legs)
            .unwrap()
            .resolve(&ReferenceData::standard())
            .unwrap(),
    )
}

fn env() -> ImmutablePricingEnvironment {
    ImmutablePricingEnvironment::new(date(2016, 1, 4))
        .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
        .with_forward_curve(IborIndexId::new("USD-LIBOR-3M"), FlatCurve::new(0.012))
}

fn benchmark_swap_present_value(c: &mut Criterion) {
    let registry = PricerRegistry::standard();
    let env = env();
    let mut group = c.benchmark_group("swap_present_value");

    for years in [2, 10, 30] {
        let product = swap(years);
        group.bench_with_input(BenchmarkId::from_parameter(years), &product, |b, p| {
            b.iter(|| registry.present_value(black_box(&env), black_box(p)))
        });
    }

    group.finish();
}

fn benchmark_swap_explain(c: &mut Criterion) {
    let registry = PricerRegistry::standard();
    let env = env();
    let product = swap(10);

    c.bench_function("swap_explain_10y", |b| {
        b.iter(|| registry.explain(black_box(&env), black_box(&product)))
    });
}

fn benchmark_batch(c: &mut Criterion) {
    let registry = PricerRegistry::standard();
    let env = env();
    let mut group = c.benchmark_group("batch_present_values");

    for size in [10, 100, 1000] {
        let products: Vec<_> = (0..size).map(|i| swap(1 + (i % 30) as i32)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, ps| {
            b.iter(|| registry.present_values(black_box(&env), black_box(ps)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_swap_present_value,
    benchmark_swap_explain,
    benchmark_batch
);
criterion_main!(benches);
