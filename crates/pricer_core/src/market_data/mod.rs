//! Market data consumed by pricers.
//!
//! # Components
//!
//! - [`curves`]: Yield curve trait and the flat curve implementation
//! - [`environment`]: The [`PricingEnvironment`] seam and an in-memory implementation
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{ImmutablePricingEnvironment, PricingEnvironment};
//! use pricer_core::market_data::curves::FlatCurve;
//! use pricer_core::types::{Currency, Date};
//!
//! let today = Date::from_ymd(2015, 6, 15).unwrap();
//! let env = ImmutablePricingEnvironment::new(today)
//!     .with_discount_curve(Currency::USD, FlatCurve::new(0.01));
//!
//! let df = env.discount_factor(Currency::USD, today).unwrap();
//! assert_eq!(df, 1.0);
//! ```

pub mod curves;
pub mod environment;
pub mod error;

pub use curves::{FlatCurve, YieldCurve};
pub use environment::{ImmutablePricingEnvironment, PricingEnvironment};
pub use error::MarketDataError;
