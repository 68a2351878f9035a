//! Curves backing the in-memory pricing environment.
//!
//! [`YieldCurve`] answers discount factor and rate queries by year fraction;
//! [`FlatCurve`] is its constant-rate implementation.

mod flat;
mod traits;

pub use flat::FlatCurve;
pub use traits::YieldCurve;
