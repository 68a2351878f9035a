//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod explain;
pub mod price;

use std::path::Path;

use pricer_core::market_data::ImmutablePricingEnvironment;
use pricer_core::reference_data::ReferenceData;
use tracing::info;

use crate::config::CliConfig;
use crate::market::MarketData;
use crate::portfolio::Portfolio;
use crate::{CliError, Result};

/// Everything a pricing command needs, loaded once.
pub struct PricingInputs {
    /// Validated trades
    pub portfolio: Portfolio,
    /// Market as of the valuation date
    pub env: ImmutablePricingEnvironment,
    /// Calendars and indices for resolution
    pub ref_data: ReferenceData,
}

impl PricingInputs {
    /// Loads portfolio and market files.
    ///
    /// The configured valuation date wins over the market file's own date.
    pub fn load(portfolio: &Path, market: &Path, config: &CliConfig) -> Result<Self> {
        let portfolio = Portfolio::load(portfolio)?;
        let market = MarketData::load(market)?;
        Self::from_parts(portfolio, &market, config)
    }

    /// Combines already parsed inputs.
    pub fn from_parts(portfolio: Portfolio, market: &MarketData, config: &CliConfig) -> Result<Self> {
        let valuation_date = config
            .valuation_date
            .or(market.valuation_date)
            .ok_or_else(|| {
                CliError::InvalidArgument(
                    "no valuation date: pass --date, set NEUTRYX_VALUATION_DATE or add valuation_date to the market file"
                        .to_string(),
                )
            })?;
        info!("  Valuation date: {}", valuation_date);

        Ok(Self {
            portfolio,
            env: market.environment(valuation_date)?,
            ref_data: market.reference_data(),
        })
    }
}
