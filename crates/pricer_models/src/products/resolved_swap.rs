//! Resolved swaps: legs of dated, calculation-ready payment periods.

use std::collections::BTreeSet;
use std::fmt;

use pricer_core::types::{Currency, Date, IborIndex, IborIndexId, PayReceive};

use super::error::ProductError;

// ResolvedSwapLeg::new and ResolvedSwap::new reject empty lists.
const NON_EMPTY: &str = "resolved legs and swaps hold at least one element";

/// Classification of a swap leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapLegType {
    /// Fixed rate coupons.
    Fixed,
    /// Coupons set by an Ibor index.
    Ibor,
    /// Anything else, such as known amounts.
    Other,
}

impl fmt::Display for SwapLegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapLegType::Fixed => write!(f, "Fixed"),
            SwapLegType::Ibor => write!(f, "Ibor"),
            SwapLegType::Other => write!(f, "Other"),
        }
    }
}

/// Dates and conventions of one Ibor fixing.
#[derive(Debug, Clone, PartialEq)]
pub struct IborRateComputation {
    /// The index, with its conventions frozen at resolution
    pub index: IborIndex,
    /// Date the rate is observed
    pub fixing_date: Date,
    /// Start of the underlying deposit
    pub effective_date: Date,
    /// End of the underlying deposit
    pub maturity_date: Date,
    /// Index day count fraction of the deposit period
    pub year_fraction: f64,
}

/// How the rate of an accrual period is determined.
#[derive(Debug, Clone, PartialEq)]
pub enum RateComputation {
    /// A contractual rate.
    Fixed(f64),
    /// An Ibor fixing.
    Ibor(IborRateComputation),
}

/// One accrual period within a rate payment period.
#[derive(Debug, Clone, PartialEq)]
pub struct RateAccrualPeriod {
    /// Adjusted accrual start
    pub start_date: Date,
    /// Adjusted accrual end
    pub end_date: Date,
    /// Accrual year fraction under the leg's day count
    pub year_fraction: f64,
    /// Source of the rate
    pub rate_computation: RateComputation,
    /// Added to the rate, zero for fixed periods
    pub spread: f64,
}

/// A payment of accrued interest over one or more accrual periods.
///
/// Several accrual periods share one payment when the payment frequency
/// is coarser than the accrual frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct RatePaymentPeriod {
    /// Date the interest is paid
    pub payment_date: Date,
    /// Currency of the payment
    pub currency: Currency,
    /// Notional, negative when paid
    pub notional: f64,
    /// Accrual periods in date order
    pub accrual_periods: Vec<RateAccrualPeriod>,
}

impl RatePaymentPeriod {
    /// Start of the first accrual period.
    pub fn start_date(&self) -> Date {
        self.accrual_periods
            .first()
            .map_or(self.payment_date, |p| p.start_date)
    }

    /// End of the last accrual period.
    pub fn end_date(&self) -> Date {
        self.accrual_periods
            .last()
            .map_or(self.payment_date, |p| p.end_date)
    }
}

/// A payment of a contractually known amount.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownAmountPaymentPeriod {
    /// Date the amount is paid
    pub payment_date: Date,
    /// Period start
    pub start_date: Date,
    /// Period end
    pub end_date: Date,
    /// Currency of the amount
    pub currency: Currency,
    /// Amount, negative when paid
    pub amount: f64,
}

/// A single payment on a swap leg.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentPeriod {
    /// Interest accrued at a rate.
    Rate(RatePaymentPeriod),
    /// A known amount.
    KnownAmount(KnownAmountPaymentPeriod),
}

impl PaymentPeriod {
    /// Date of payment.
    pub fn payment_date(&self) -> Date {
        match self {
            PaymentPeriod::Rate(p) => p.payment_date,
            PaymentPeriod::KnownAmount(p) => p.payment_date,
        }
    }

    /// Currency of payment.
    pub fn currency(&self) -> Currency {
        match self {
            PaymentPeriod::Rate(p) => p.currency,
            PaymentPeriod::KnownAmount(p) => p.currency,
        }
    }

    /// Start of the period.
    pub fn start_date(&self) -> Date {
        match self {
            PaymentPeriod::Rate(p) => p.start_date(),
            PaymentPeriod::KnownAmount(p) => p.start_date,
        }
    }

    /// End of the period.
    pub fn end_date(&self) -> Date {
        match self {
            PaymentPeriod::Rate(p) => p.end_date(),
            PaymentPeriod::KnownAmount(p) => p.end_date,
        }
    }
}

/// A resolved swap leg: payment periods sorted by payment date, all in one currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSwapLeg {
    leg_type: SwapLegType,
    pay_receive: PayReceive,
    currency: Currency,
    payment_periods: Vec<PaymentPeriod>,
}

impl ResolvedSwapLeg {
    /// Creates a leg, sorting the periods by payment date.
    ///
    /// # Errors
    ///
    /// - `ProductError::InvalidParameter` if there are no periods
    /// - `ProductError::CrossCurrency` if a period is not in the leg currency
    pub fn new(
        leg_type: SwapLegType,
        pay_receive: PayReceive,
        currency: Currency,
        mut payment_periods: Vec<PaymentPeriod>,
    ) -> Result<Self, ProductError> {
        if payment_periods.is_empty() {
            return Err(ProductError::InvalidParameter {
                message: "swap leg must have at least one payment period".to_string(),
            });
        }
        if let Some(other) = payment_periods
            .iter()
            .map(PaymentPeriod::currency)
            .find(|c| *c != currency)
        {
            return Err(ProductError::CrossCurrency {
                currencies: vec![currency, other],
            });
        }
        payment_periods.sort_by_key(PaymentPeriod::payment_date);
        Ok(Self {
            leg_type,
            pay_receive,
            currency,
            payment_periods,
        })
    }

    /// Builds a leg from periods generated by resolution, which are already
    /// non-empty, in order and in the leg currency.
    pub(crate) fn from_resolution(
        leg_type: SwapLegType,
        pay_receive: PayReceive,
        currency: Currency,
        payment_periods: Vec<PaymentPeriod>,
    ) -> Self {
        Self {
            leg_type,
            pay_receive,
            currency,
            payment_periods,
        }
    }

    /// Fixed, Ibor or Other.
    pub fn leg_type(&self) -> SwapLegType {
        self.leg_type
    }

    /// Whether the holder pays or receives.
    pub fn pay_receive(&self) -> PayReceive {
        self.pay_receive
    }

    /// Leg currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Payment periods in payment date order.
    pub fn payment_periods(&self) -> &[PaymentPeriod] {
        &self.payment_periods
    }

    /// Earliest period start.
    pub fn start_date(&self) -> Date {
        self.payment_periods
            .iter()
            .map(PaymentPeriod::start_date)
            .min()
            .expect(NON_EMPTY)
    }

    /// Latest period end.
    pub fn end_date(&self) -> Date {
        self.payment_periods
            .iter()
            .map(PaymentPeriod::end_date)
            .max()
            .expect(NON_EMPTY)
    }

    /// Last payment date.
    pub fn last_payment_date(&self) -> Date {
        self.payment_periods
            .last()
            .map(PaymentPeriod::payment_date)
            .expect(NON_EMPTY)
    }

    /// Ibor computations in date order.
    pub fn ibor_computations(&self) -> impl Iterator<Item = &IborRateComputation> {
        self.rate_accrual_periods()
            .filter_map(|a| match &a.rate_computation {
                RateComputation::Ibor(ibor) => Some(ibor),
                RateComputation::Fixed(_) => None,
            })
    }

    /// First Ibor index referenced by the leg.
    pub fn index(&self) -> Option<&IborIndex> {
        self.ibor_computations().next().map(|c| &c.index)
    }

    /// Fixed rate of the first fixed accrual period.
    pub fn fixed_rate(&self) -> Option<f64> {
        self.rate_accrual_periods()
            .find_map(|a| match a.rate_computation {
                RateComputation::Fixed(rate) => Some(rate),
                RateComputation::Ibor(_) => None,
            })
    }

    fn rate_accrual_periods(&self) -> impl Iterator<Item = &RateAccrualPeriod> {
        self.payment_periods
            .iter()
            .filter_map(|p| match p {
                PaymentPeriod::Rate(rate) => Some(rate.accrual_periods.iter()),
                PaymentPeriod::KnownAmount(_) => None,
            })
            .flatten()
    }
}

/// A resolved swap: one or more resolved legs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSwap {
    legs: Vec<ResolvedSwapLeg>,
}

impl ResolvedSwap {
    /// Creates a swap from resolved legs.
    ///
    /// # Errors
    ///
    /// `ProductError::EmptySwap` if `legs` is empty.
    pub fn new(legs: Vec<ResolvedSwapLeg>) -> Result<Self, ProductError> {
        if legs.is_empty() {
            return Err(ProductError::EmptySwap);
        }
        Ok(Self { legs })
    }

    /// Builds a swap from legs resolved from a validated, non-empty swap.
    pub(crate) fn from_legs(legs: Vec<ResolvedSwapLeg>) -> Self {
        Self { legs }
    }

    /// The legs, in contract order.
    pub fn legs(&self) -> &[ResolvedSwapLeg] {
        &self.legs
    }

    /// Legs of one type.
    pub fn legs_of_type(&self, leg_type: SwapLegType) -> impl Iterator<Item = &ResolvedSwapLeg> {
        self.legs.iter().filter(move |l| l.leg_type() == leg_type)
    }

    /// Every currency paid or received, ordered.
    pub fn all_currencies(&self) -> BTreeSet<Currency> {
        self.legs.iter().map(ResolvedSwapLeg::currency).collect()
    }

    /// Every Ibor index referenced, in leg order, without repeats.
    pub fn all_indices(&self) -> Vec<IborIndexId> {
        let mut indices: Vec<IborIndexId> = Vec::new();
        for computation in self.legs.iter().flat_map(ResolvedSwapLeg::ibor_computations) {
            if !indices.contains(computation.index.id()) {
                indices.push(computation.index.id().clone());
            }
        }
        indices
    }

    /// True if more than one currency is involved.
    pub fn is_cross_currency(&self) -> bool {
        self.all_currencies().len() > 1
    }

    /// Earliest leg start.
    pub fn start_date(&self) -> Date {
        self.legs
            .iter()
            .map(ResolvedSwapLeg::start_date)
            .min()
            .expect(NON_EMPTY)
    }

    /// Latest leg end.
    pub fn end_date(&self) -> Date {
        self.legs
            .iter()
            .map(ResolvedSwapLeg::end_date)
            .max()
            .expect(NON_EMPTY)
    }

    /// Latest payment date across all legs.
    pub fn last_payment_date(&self) -> Date {
        self.legs
            .iter()
            .map(ResolvedSwapLeg::last_payment_date)
            .max()
            .expect(NON_EMPTY)
    }
}
