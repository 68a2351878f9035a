//! Black-76 option formula on a forward.
//!
//! **Call**: F·N(d₁) - K·N(d₂)
//! **Put**: K·N(-d₂) - F·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(F/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Prices are undiscounted; callers scale by an annuity or discount factor.

use std::f64::consts::SQRT_2;

/// Call or put on the forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCall {
    /// Pays max(F - K, 0)
    Call,
    /// Pays max(K - F, 0)
    Put,
}

impl PutCall {
    fn intrinsic(&self, forward: f64, strike: f64) -> f64 {
        match self {
            PutCall::Call => (forward - strike).max(0.0),
            PutCall::Put => (strike - forward).max(0.0),
        }
    }
}

/// Complementary error function, Abramowitz and Stegun 7.1.26.
///
/// Maximum absolute error is about 1.5e-7.
fn erfc(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < 0.0 {
        2.0 - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// ```
/// use pricer_pricing::black::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96) - 0.975).abs() < 1e-3);
/// ```
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Undiscounted Black-76 price.
///
/// With no time value left (`expiry <= 0` or `volatility <= 0`) or a
/// non-positive forward or strike, the intrinsic value is returned.
///
/// # Examples
///
/// ```
/// use pricer_pricing::black::{black_price, PutCall};
///
/// let call = black_price(0.02, 0.015, 0.3, 1.0, PutCall::Call);
/// let put = black_price(0.02, 0.015, 0.3, 1.0, PutCall::Put);
///
/// // Put-call parity on the forward
/// assert!((call - put - 0.005).abs() < 1e-12);
/// ```
pub fn black_price(
    forward: f64,
    strike: f64,
    volatility: f64,
    expiry: f64,
    put_call: PutCall,
) -> f64 {
    let std_dev = volatility * expiry.max(0.0).sqrt();
    if std_dev <= 0.0 || forward <= 0.0 || strike <= 0.0 {
        return put_call.intrinsic(forward, strike);
    }
    let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
    let d2 = d1 - std_dev;
    match put_call {
        PutCall::Call => forward * norm_cdf(d1) - strike * norm_cdf(d2),
        PutCall::Put => strike * norm_cdf(-d2) - forward * norm_cdf(-d1),
    }
}
