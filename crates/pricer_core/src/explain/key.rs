//! Explain column identifiers.

use std::fmt;

/// Identifier of an explain column.
///
/// Each key has a stable display header; reports built through
/// [`CashFlowReportBuilder`](super::CashFlowReportBuilder) take their
/// headers from here.
///
/// ```
/// use pricer_core::explain::ExplainKey;
///
/// assert_eq!(ExplainKey::PaymentDate.header(), "Payment Date");
/// assert_eq!(ExplainKey::PresentValue.to_string(), "Present Value");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplainKey {
    /// Kind of row: "Cash Flow", "Future", "Swaption", ...
    EntryType,
    /// Fixed, Ibor or Other
    LegType,
    /// Pay or Receive
    PayReceive,
    /// Date the cash flow is paid
    PaymentDate,
    /// Accrual start
    StartDate,
    /// Accrual end
    EndDate,
    /// Index fixing date
    FixingDate,
    /// Index name
    Index,
    /// Accrual year fraction
    AccrualYearFraction,
    /// Contractual fixed rate
    FixedRate,
    /// Fixed, fixed-by-index or forward rate used
    ForecastRate,
    /// Spread over the index
    Spread,
    /// Signed notional
    Notional,
    /// Currency of the row
    Currency,
    /// Forward price of an underlying
    ForwardPrice,
    /// Strike price
    StrikePrice,
    /// Value of one price point
    UnitAmount,
    /// Option expiry
    ExpiryDate,
    /// Settlement date
    SettlementDate,
    /// Option strike as a rate
    StrikeRate,
    /// Forward par swap rate
    ForwardSwapRate,
    /// Black volatility
    Volatility,
    /// Annuity used to scale the option value
    Annuity,
    /// Undiscounted value on the payment date
    ForecastValue,
    /// Discount factor to the valuation date
    DiscountFactor,
    /// Discounted value
    PresentValue,
}

impl ExplainKey {
    /// Stable column header.
    pub fn header(&self) -> &'static str {
        match self {
            ExplainKey::EntryType => "Entry Type",
            ExplainKey::LegType => "Leg Type",
            ExplainKey::PayReceive => "Pay/Receive",
            ExplainKey::PaymentDate => "Payment Date",
            ExplainKey::StartDate => "Start Date",
            ExplainKey::EndDate => "End Date",
            ExplainKey::FixingDate => "Fixing Date",
            ExplainKey::Index => "Index",
            ExplainKey::AccrualYearFraction => "Accrual Year Fraction",
            ExplainKey::FixedRate => "Fixed Rate",
            ExplainKey::ForecastRate => "Forecast Rate",
            ExplainKey::Spread => "Spread",
            ExplainKey::Notional => "Notional",
            ExplainKey::Currency => "Currency",
            ExplainKey::ForwardPrice => "Forward Price",
            ExplainKey::StrikePrice => "Strike Price",
            ExplainKey::UnitAmount => "Unit Amount",
            ExplainKey::ExpiryDate => "Expiry Date",
            ExplainKey::SettlementDate => "Settlement Date",
            ExplainKey::StrikeRate => "Strike Rate",
            ExplainKey::ForwardSwapRate => "Forward Swap Rate",
            ExplainKey::Volatility => "Volatility",
            ExplainKey::Annuity => "Annuity",
            ExplainKey::ForecastValue => "Forecast Value",
            ExplainKey::DiscountFactor => "Discount Factor",
            ExplainKey::PresentValue => "Present Value",
        }
    }
}

impl fmt::Display for ExplainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}
