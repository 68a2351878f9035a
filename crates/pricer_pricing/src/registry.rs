//! Dispatch from a resolved product to the pricer for its variant.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pricer_core::explain::{CashFlowReport, CashFlowReportBuilder};
use pricer_core::market_data::PricingEnvironment;
use pricer_core::types::{CurrencyAmount, PricingError};
use pricer_models::products::{
    EquityFuture, ProductKind, ResolvedProduct, ResolvedSwap, ResolvedSwapLeg, ResolvedSwaption,
};
use rayon::prelude::*;

use crate::equity_future::DiscountingEquityFuturePricer;
use crate::pricer::ProductPricer;
use crate::swap::{DiscountingSwapLegPricer, DiscountingSwapPricer};
use crate::swaption::BlackSwaptionPricer;

type Slot<P> = Option<Arc<dyn ProductPricer<P>>>;

/// One typed pricer slot per [`ResolvedProduct`] variant.
///
/// Built once, then shared read-only. Dispatch is an exhaustive match on
/// the product, so a new variant cannot be added without a slot here.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment};
/// use pricer_core::types::{Currency, CurrencyAmount, Date, SecurityId};
/// use pricer_models::products::{EquityFuture, ResolvedProduct};
/// use pricer_pricing::PricerRegistry;
///
/// let registry = PricerRegistry::standard();
/// let env = ImmutablePricingEnvironment::new(Date::from_ymd(2015, 6, 15).unwrap())
///     .with_discount_curve(Currency::USD, FlatCurve::new(0.0))
///     .with_equity_price(SecurityId::new("OG-Future"), 101.0);
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
/// let pv = registry
///     .present_value(&env, &ResolvedProduct::EquityFuture(future))
///     .unwrap();
/// assert_eq!(pv, CurrencyAmount::new(Currency::USD, 250.0));
/// ```
#[derive(Clone, Default)]
pub struct PricerRegistry {
    equity_future: Slot<EquityFuture>,
    swap_leg: Slot<ResolvedSwapLeg>,
    swap: Slot<ResolvedSwap>,
    swaption: Slot<ResolvedSwaption>,
}

impl PricerRegistry {
    /// A registry with no pricers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Discounting pricers for futures, legs and swaps, Black for swaptions.
    pub fn standard() -> Self {
        let leg_pricer = DiscountingSwapLegPricer::default();
        Self::empty()
            .with_equity_future_pricer(DiscountingEquityFuturePricer)
            .with_swap_leg_pricer(leg_pricer.clone())
            .with_swap_pricer(DiscountingSwapPricer::new(leg_pricer.clone()))
            .with_swaption_pricer(BlackSwaptionPricer::new(leg_pricer))
    }

    /// Registers the equity future pricer, replacing any earlier one.
    pub fn with_equity_future_pricer(
        mut self,
        pricer: impl ProductPricer<EquityFuture> + 'static,
    ) -> Self {
        self.equity_future = Some(Arc::new(pricer));
        self
    }

    /// Registers the swap leg pricer, replacing any earlier one.
    pub fn with_swap_leg_pricer(
        mut self,
        pricer: impl ProductPricer<ResolvedSwapLeg> + 'static,
    ) -> Self {
        self.swap_leg = Some(Arc::new(pricer));
        self
    }

    /// Registers the swap pricer, replacing any earlier one.
    pub fn with_swap_pricer(mut self, pricer: impl ProductPricer<ResolvedSwap> + 'static) -> Self {
        self.swap = Some(Arc::new(pricer));
        self
    }

    /// Registers the swaption pricer, replacing any earlier one.
    pub fn with_swaption_pricer(
        mut self,
        pricer: impl ProductPricer<ResolvedSwaption> + 'static,
    ) -> Self {
        self.swaption = Some(Arc::new(pricer));
        self
    }

    /// Name of the pricer registered for a variant.
    pub fn pricer_name(&self, kind: ProductKind) -> Option<&'static str> {
        match kind {
            ProductKind::EquityFuture => self.equity_future.as_ref().map(|p| p.name()),
            ProductKind::SwapLeg => self.swap_leg.as_ref().map(|p| p.name()),
            ProductKind::Swap => self.swap.as_ref().map(|p| p.name()),
            ProductKind::Swaption => self.swaption.as_ref().map(|p| p.name()),
        }
    }

    /// True if a pricer is registered for the variant.
    pub fn supports(&self, kind: ProductKind) -> bool {
        self.pricer_name(kind).is_some()
    }

    /// Present value of any resolved product.
    ///
    /// # Errors
    ///
    /// - `PricingError::UnsupportedProduct` if no pricer is registered for the variant
    /// - whatever the selected pricer returns
    pub fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        product: &ResolvedProduct,
    ) -> Result<CurrencyAmount, PricingError> {
        tracing::debug!(product = %product.kind(), "present value");
        match product {
            ResolvedProduct::EquityFuture(p) => slot(&self.equity_future, product)?.present_value(env, p),
            ResolvedProduct::SwapLeg(p) => slot(&self.swap_leg, product)?.present_value(env, p),
            ResolvedProduct::Swap(p) => slot(&self.swap, product)?.present_value(env, p),
            ResolvedProduct::Swaption(p) => slot(&self.swaption, product)?.present_value(env, p),
        }
    }

    /// Future value of any resolved product.
    ///
    /// # Errors
    ///
    /// As [`present_value`](Self::present_value).
    pub fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        product: &ResolvedProduct,
    ) -> Result<CurrencyAmount, PricingError> {
        tracing::debug!(product = %product.kind(), "future value");
        match product {
            ResolvedProduct::EquityFuture(p) => slot(&self.equity_future, product)?.future_value(env, p),
            ResolvedProduct::SwapLeg(p) => slot(&self.swap_leg, product)?.future_value(env, p),
            ResolvedProduct::Swap(p) => slot(&self.swap, product)?.future_value(env, p),
            ResolvedProduct::Swaption(p) => slot(&self.swaption, product)?.future_value(env, p),
        }
    }

    /// Cash flow report of any resolved product, stamped with the current time.
    ///
    /// # Errors
    ///
    /// As [`present_value`](Self::present_value).
    pub fn explain(
        &self,
        env: &dyn PricingEnvironment,
        product: &ResolvedProduct,
    ) -> Result<CashFlowReport, PricingError> {
        self.explain_at(env, product, Utc::now())
    }

    /// Cash flow report stamped with an explicit run instant.
    ///
    /// # Errors
    ///
    /// As [`present_value`](Self::present_value).
    pub fn explain_at(
        &self,
        env: &dyn PricingEnvironment,
        product: &ResolvedProduct,
        run_instant: DateTime<Utc>,
    ) -> Result<CashFlowReport, PricingError> {
        tracing::debug!(product = %product.kind(), "explain");
        match product {
            ResolvedProduct::EquityFuture(p) => {
                explain_with(slot(&self.equity_future, product)?, env, p, run_instant)
            }
            ResolvedProduct::SwapLeg(p) => {
                explain_with(slot(&self.swap_leg, product)?, env, p, run_instant)
            }
            ResolvedProduct::Swap(p) => explain_with(slot(&self.swap, product)?, env, p, run_instant),
            ResolvedProduct::Swaption(p) => {
                explain_with(slot(&self.swaption, product)?, env, p, run_instant)
            }
        }
    }

    /// Present values of many products, computed in parallel.
    ///
    /// Results are in input order; one product failing does not affect the others.
    pub fn present_values(
        &self,
        env: &dyn PricingEnvironment,
        products: &[ResolvedProduct],
    ) -> Vec<Result<CurrencyAmount, PricingError>> {
        products
            .par_iter()
            .map(|product| self.present_value(env, product))
            .collect()
    }
}

impl fmt::Debug for PricerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in ProductKind::ALL {
            map.entry(&kind.name(), &self.pricer_name(kind));
        }
        map.finish()
    }
}

fn slot<'a, P>(
    slot: &'a Slot<P>,
    product: &ResolvedProduct,
) -> Result<&'a dyn ProductPricer<P>, PricingError> {
    slot.as_deref().ok_or_else(|| {
        let kind = product.kind();
        tracing::error!(product = %kind, "no pricer registered");
        PricingError::UnsupportedProduct {
            product: kind.name().to_string(),
        }
    })
}

fn explain_with<P>(
    pricer: &dyn ProductPricer<P>,
    env: &dyn PricingEnvironment,
    product: &P,
    run_instant: DateTime<Utc>,
) -> Result<CashFlowReport, PricingError> {
    let mut builder = CashFlowReportBuilder::new(pricer.explain_columns());
    pricer.explain(env, product, &mut builder)?;
    Ok(builder.build(env.valuation_date(), run_instant))
}
