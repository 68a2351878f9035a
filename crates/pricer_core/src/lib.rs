//! # pricer_core: Valuation Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Value types: `Currency`, `CurrencyAmount`, `LongShort`, `PayReceive`,
//!   `Date`, day counts, holiday calendars, index conventions (`types`)
//! - Reference data with typed identifier lookup (`reference_data`)
//! - The `PricingEnvironment` market data seam and flat curves (`market_data`)
//! - Explain keys, values and the immutable `CashFlowReport` (`explain`)
//! - Error types: `PricingError`, `DateError`, `CurrencyError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Currency, CurrencyAmount, Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let year_fraction = DayCountConvention::ActualActual365.year_fraction_dates(start, end);
//! # assert!(year_fraction > 0.49);
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(CurrencyAmount::new(usd, 250.0).to_string(), "USD 250.00");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for value types, identifiers and conventions

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod explain;
pub mod market_data;
pub mod reference_data;
pub mod types;
