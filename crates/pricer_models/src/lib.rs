//! # Pricer Models (L2: Products)
//!
//! Product definitions and their resolution against reference data.
//!
//! This crate provides:
//! - Validated product definitions (equity futures, swap legs, swaps, swaptions)
//! - Periodic schedule generation with business-day adjustment
//! - Resolution into immutable, calculation-ready products
//! - The [`products::ResolvedProduct`] sum type that pricers dispatch on
//!
//! ## Design Principles
//!
//! - **Validating constructors**: every product is checked when built, so
//!   no invalid instance exists
//! - **Resolve once**: calendars and index conventions are applied during
//!   resolution and never consulted again
//! - **Enum-based products** for exhaustive, static dispatch

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod products;
pub mod schedules;
