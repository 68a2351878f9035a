//! The capability every product pricer implements.

use pricer_core::explain::{CashFlowReportBuilder, ExplainKey};
use pricer_core::market_data::PricingEnvironment;
use pricer_core::types::{CurrencyAmount, PricingError};

/// Prices one resolved product type.
///
/// Implementations hold no per-call mutable state and are shared across
/// threads through the [`PricerRegistry`](crate::PricerRegistry).
///
/// # Past-dated products
///
/// The product's payment or settlement date must not be before
/// `env.valuation_date()`. For a past date the result is undefined but
/// deterministic: no pricer clamps, filters or rejects it, and none panics.
pub trait ProductPricer<P>: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Value discounted to the valuation date, in the product currency.
    ///
    /// Positive means value to the holder. See the trait docs for
    /// products paying before the valuation date.
    fn present_value(
        &self,
        env: &dyn PricingEnvironment,
        product: &P,
    ) -> Result<CurrencyAmount, PricingError>;

    /// Undiscounted value as of the product's own payment or settlement date.
    ///
    /// Same currency and sign convention as [`present_value`](Self::present_value).
    fn future_value(
        &self,
        env: &dyn PricingEnvironment,
        product: &P,
    ) -> Result<CurrencyAmount, PricingError>;

    /// Columns of the explain report, in order.
    fn explain_columns(&self) -> &'static [ExplainKey];

    /// Appends one row per cash flow or event, in payment date order.
    ///
    /// `builder` was created with [`explain_columns`](Self::explain_columns).
    fn explain(
        &self,
        env: &dyn PricingEnvironment,
        product: &P,
        builder: &mut CashFlowReportBuilder,
    ) -> Result<(), PricingError>;
}
