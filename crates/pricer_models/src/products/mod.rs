//! Products and their resolved, calculation-ready forms.
//!
//! A product is a validated contractual description. Resolving it against
//! [`ReferenceData`] applies calendars and conventions once and yields a
//! [`ResolvedProduct`], which is what pricers consume.
//!
//! ## Variants
//!
//! - [`EquityFuture`]: resolves to itself
//! - [`SwapLeg`]: resolves to a [`ResolvedSwapLeg`]
//! - [`Swap`]: resolves to a [`ResolvedSwap`]
//! - [`Swaption`]: resolves to a [`ResolvedSwaption`]

mod equity_future;
mod error;
mod resolved_swap;
mod swap;
mod swap_leg;
mod swaption;
mod traits;

use std::fmt;

use pricer_core::reference_data::{ReferenceData, ReferenceDataError};
use pricer_core::types::{Currency, Date};

pub use equity_future::EquityFuture;
pub use error::ProductError;
pub use resolved_swap::{
    IborRateComputation, KnownAmountPaymentPeriod, PaymentPeriod, RateAccrualPeriod,
    RateComputation, RatePaymentPeriod, ResolvedSwap, ResolvedSwapLeg, SwapLegType,
};
pub use swap::Swap;
pub use swap_leg::{KnownAmountSwapLeg, RateCalculation, RateCalculationSwapLeg, SwapLeg};
pub use swaption::{
    CashSettlementMethod, ResolvedSwaption, ResolvedSwaptionSettlement, Swaption,
    SwaptionSettlement,
};
pub use traits::Resolvable;

/// The product variants known to the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductKind {
    /// Equity future
    EquityFuture,
    /// Single swap leg
    SwapLeg,
    /// Swap
    Swap,
    /// Swaption
    Swaption,
}

impl ProductKind {
    /// Every variant, in declaration order.
    pub const ALL: [ProductKind; 4] = [
        ProductKind::EquityFuture,
        ProductKind::SwapLeg,
        ProductKind::Swap,
        ProductKind::Swaption,
    ];

    /// Variant name.
    pub fn name(&self) -> &'static str {
        match self {
            ProductKind::EquityFuture => "EquityFuture",
            ProductKind::SwapLeg => "SwapLeg",
            ProductKind::Swap => "Swap",
            ProductKind::Swaption => "Swaption",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Any product before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    /// Equity future
    EquityFuture(EquityFuture),
    /// Single swap leg
    SwapLeg(SwapLeg),
    /// Swap
    Swap(Swap),
    /// Swaption
    Swaption(Swaption),
}

impl Product {
    /// Variant of this product.
    pub fn kind(&self) -> ProductKind {
        match self {
            Product::EquityFuture(_) => ProductKind::EquityFuture,
            Product::SwapLeg(_) => ProductKind::SwapLeg,
            Product::Swap(_) => ProductKind::Swap,
            Product::Swaption(_) => ProductKind::Swaption,
        }
    }
}

impl Resolvable for Product {
    type Resolved = ResolvedProduct;

    fn resolve(&self, ref_data: &ReferenceData) -> Result<ResolvedProduct, ReferenceDataError> {
        tracing::debug!(product = %self.kind(), "resolving product");
        let resolved = match self {
            Product::EquityFuture(p) => ResolvedProduct::EquityFuture(p.resolve(ref_data)?),
            Product::SwapLeg(p) => ResolvedProduct::SwapLeg(p.resolve(ref_data)?),
            Product::Swap(p) => ResolvedProduct::Swap(p.resolve(ref_data)?),
            Product::Swaption(p) => ResolvedProduct::Swaption(p.resolve(ref_data)?),
        };
        Ok(resolved)
    }
}

impl From<EquityFuture> for Product {
    fn from(value: EquityFuture) -> Self {
        Product::EquityFuture(value)
    }
}

impl From<SwapLeg> for Product {
    fn from(value: SwapLeg) -> Self {
        Product::SwapLeg(value)
    }
}

impl From<Swap> for Product {
    fn from(value: Swap) -> Self {
        Product::Swap(value)
    }
}

impl From<Swaption> for Product {
    fn from(value: Swaption) -> Self {
        Product::Swaption(value)
    }
}

/// Any resolved product.
///
/// Pricers dispatch on this with an exhaustive match, so adding a variant
/// is a compile error until every dispatch site handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedProduct {
    /// Equity future
    EquityFuture(EquityFuture),
    /// Single swap leg
    SwapLeg(ResolvedSwapLeg),
    /// Swap
    Swap(ResolvedSwap),
    /// Swaption
    Swaption(ResolvedSwaption),
}

impl ResolvedProduct {
    /// Variant of this product.
    pub fn kind(&self) -> ProductKind {
        match self {
            ResolvedProduct::EquityFuture(_) => ProductKind::EquityFuture,
            ResolvedProduct::SwapLeg(_) => ProductKind::SwapLeg,
            ResolvedProduct::Swap(_) => ProductKind::Swap,
            ResolvedProduct::Swaption(_) => ProductKind::Swaption,
        }
    }

    /// Natural currency of the product; `None` for a cross-currency swap.
    pub fn currency(&self) -> Option<Currency> {
        match self {
            ResolvedProduct::EquityFuture(p) => Some(p.currency()),
            ResolvedProduct::SwapLeg(p) => Some(p.currency()),
            ResolvedProduct::Swap(p) => {
                let currencies = p.all_currencies();
                match currencies.len() {
                    1 => currencies.into_iter().next(),
                    _ => None,
                }
            }
            ResolvedProduct::Swaption(p) => Some(p.currency()),
        }
    }

    /// Date the product's value is anchored at.
    ///
    /// Settlement date for futures and swaptions, last payment date for legs and swaps.
    pub fn payment_date(&self) -> Date {
        match self {
            ResolvedProduct::EquityFuture(p) => p.settlement_date(),
            ResolvedProduct::SwapLeg(p) => p.last_payment_date(),
            ResolvedProduct::Swap(p) => p.last_payment_date(),
            ResolvedProduct::Swaption(p) => p.settlement_date(),
        }
    }
}
