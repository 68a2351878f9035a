//! Discounting and projection interface shared by curves.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// A term structure queried by time in years from its reference date.
///
/// Only [`discount_factor`](YieldCurve::discount_factor) is required; the
/// zero and forward rates are derived from it as continuously compounded
/// rates. Times may be negative when a cash flow falls before the
/// reference date.
///
/// Implementations must return `D(0) = 1` and `D(t) > 0`.
pub trait YieldCurve<T: Float> {
    /// Discount factor `D(t)`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Zero rate `-ln D(t) / t`, undefined at `t = 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t == T::zero() {
            return Err(MarketDataError::InvalidMaturity { t: 0.0 });
        }
        Ok(-self.discount_factor(t)?.ln() / t)
    }

    /// Forward rate `-ln(D(t2) / D(t1)) / (t2 - t1)` over a non-empty window.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let width = t2 - t1;
        if width <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: width.to_f64().unwrap_or(0.0),
            });
        }
        let ratio = self.discount_factor(t2)? / self.discount_factor(t1)?;
        Ok(-ratio.ln() / width)
    }
}
