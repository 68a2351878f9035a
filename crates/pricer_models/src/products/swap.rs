//! Interest rate swaps.

use std::collections::BTreeSet;

use pricer_core::reference_data::{ReferenceData, ReferenceDataError};
use pricer_core::types::Currency;

use super::error::ProductError;
use super::resolved_swap::ResolvedSwap;
use super::swap_leg::SwapLeg;
use super::traits::Resolvable;

/// A swap of one or more legs.
///
/// Legs may be in different currencies; single-currency products built on
/// a swap, such as swaptions, check that themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Swap {
    legs: Vec<SwapLeg>,
}

impl Swap {
    /// Creates a swap.
    ///
    /// # Errors
    ///
    /// `ProductError::EmptySwap` if `legs` is empty.
    pub fn new(legs: Vec<SwapLeg>) -> Result<Self, ProductError> {
        if legs.is_empty() {
            return Err(ProductError::EmptySwap);
        }
        Ok(Self { legs })
    }

    /// Legs in contract order.
    pub fn legs(&self) -> &[SwapLeg] {
        &self.legs
    }

    /// Every leg currency, ordered.
    pub fn all_currencies(&self) -> BTreeSet<Currency> {
        self.legs.iter().map(SwapLeg::currency).collect()
    }

    /// True if more than one currency is involved.
    pub fn is_cross_currency(&self) -> bool {
        self.all_currencies().len() > 1
    }
}

impl Resolvable for Swap {
    type Resolved = ResolvedSwap;

    fn resolve(&self, ref_data: &ReferenceData) -> Result<ResolvedSwap, ReferenceDataError> {
        let legs = self
            .legs
            .iter()
            .map(|leg| leg.resolve(ref_data))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ResolvedSwap::from_legs(legs))
    }
}
