//! Position and cash-flow direction flags.

use std::fmt;
use std::str::FromStr;

/// Whether a position is bought or sold.
///
/// ```
/// use pricer_core::types::LongShort;
///
/// assert_eq!(LongShort::Long.sign(), 1.0);
/// assert_eq!(LongShort::Short.sign(), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LongShort {
    /// Bought position.
    Long,
    /// Sold position.
    Short,
}

impl LongShort {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            LongShort::Long => 1.0,
            LongShort::Short => -1.0,
        }
    }

    /// Returns true for a long position.
    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, LongShort::Long)
    }
}

impl fmt::Display for LongShort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LongShort::Long => write!(f, "Long"),
            LongShort::Short => write!(f, "Short"),
        }
    }
}

impl FromStr for LongShort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" | "buy" => Ok(LongShort::Long),
            "short" | "sell" => Ok(LongShort::Short),
            _ => Err(format!("Unknown position direction: {}", s)),
        }
    }
}

/// Whether a leg's cash flows are paid or received by the holder.
///
/// The sign is applied to notionals and amounts when a leg is resolved,
/// so resolved cash flows already carry the holder's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayReceive {
    /// Holder pays the leg.
    Pay,
    /// Holder receives the leg.
    Receive,
}

impl PayReceive {
    /// -1 for pay, +1 for receive.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            PayReceive::Pay => -1.0,
            PayReceive::Receive => 1.0,
        }
    }

    /// Returns true for a paid leg.
    #[inline]
    pub fn is_pay(&self) -> bool {
        matches!(self, PayReceive::Pay)
    }

    /// Applies the sign to an amount.
    #[inline]
    pub fn normalize(&self, amount: f64) -> f64 {
        self.sign() * amount.abs()
    }
}

impl fmt::Display for PayReceive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayReceive::Pay => write!(f, "Pay"),
            PayReceive::Receive => write!(f, "Receive"),
        }
    }
}

impl FromStr for PayReceive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pay" | "payer" => Ok(PayReceive::Pay),
            "receive" | "receiver" => Ok(PayReceive::Receive),
            _ => Err(format!("Unknown pay/receive flag: {}", s)),
        }
    }
}
