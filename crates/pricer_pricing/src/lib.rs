//! # Pricer Pricing (Layer 3: Valuation)
//!
//! Pricers for resolved products and the registry that dispatches to them.
//!
//! ## Components
//!
//! - [`ProductPricer`]: the capability every product pricer implements
//! - [`period`]: payment period pricers with per-variant dispatch
//! - [`DiscountingEquityFuturePricer`], [`DiscountingSwapLegPricer`],
//!   [`DiscountingSwapPricer`], [`BlackSwaptionPricer`]: concrete pricers
//! - [`black`]: the Black-76 formula
//! - [`PricerRegistry`]: one typed slot per product variant, exhaustive dispatch
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{FlatCurve, ImmutablePricingEnvironment};
//! use pricer_core::reference_data::ReferenceData;
//! use pricer_core::types::{Currency, CurrencyAmount, Date, SecurityId};
//! use pricer_models::products::{EquityFuture, Product, Resolvable};
//! use pricer_pricing::PricerRegistry;
//!
//! let product = Product::from(
//!     EquityFuture::new(
//!         SecurityId::new("OG-Future"),
//!         Date::from_ymd(2015, 6, 15).unwrap(),
//!         Date::from_ymd(2015, 6, 17).unwrap(),
//!         100.0,
//!         CurrencyAmount::new(Currency::USD, 250.0),
//!     )
//!     .unwrap(),
//! );
//! let resolved = product.resolve(&ReferenceData::standard()).unwrap();
//!
//! let env = ImmutablePricingEnvironment::new(Date::from_ymd(2015, 6, 1).unwrap())
//!     .with_discount_curve(Currency::USD, FlatCurve::new(0.01))
//!     .with_equity_price(SecurityId::new("OG-Future"), 102.0);
//!
//! let registry = PricerRegistry::standard();
//! let fv = registry.future_value(&env, &resolved).unwrap();
//! assert_eq!(fv, CurrencyAmount::new(Currency::USD, 500.0));
//!
//! let report = registry.explain(&env, &resolved).unwrap();
//! assert_eq!(report.row_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod black;
pub mod equity_future;
pub mod period;
pub mod pricer;
pub mod registry;
pub mod swap;
pub mod swaption;

pub use equity_future::DiscountingEquityFuturePricer;
pub use period::{
    DiscountingKnownAmountPaymentPeriodPricer, DiscountingRatePaymentPeriodPricer,
    DispatchingPaymentPeriodPricer, PaymentPeriodPricer,
};
pub use pricer::ProductPricer;
pub use registry::PricerRegistry;
pub use swap::{DiscountingSwapLegPricer, DiscountingSwapPricer, SWAP_COLUMNS};
pub use swaption::BlackSwaptionPricer;
