//! Price command implementation
//!
//! Resolves every trade and prices present and future value through the
//! standard pricer registry. A trade that fails is reported on its own row;
//! the other trades are still priced. A product with no registered pricer
//! aborts the whole run.

use std::io::Write;
use std::path::Path;

use pricer_core::market_data::PricingEnvironment;
use pricer_core::reference_data::ReferenceData;
use pricer_core::types::PricingError;
use pricer_models::products::Resolvable;
use pricer_pricing::PricerRegistry;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use super::PricingInputs;
use crate::config::{CliConfig, OutputFormat};
use crate::format::{write_csv, write_table};
use crate::portfolio::Trade;
use crate::{CliError, Result};

const HEADERS: [&str; 6] = ["Trade", "Product", "Currency", "PV", "FV", "Error"];

/// Outcome of pricing one trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceResult {
    /// Trade identifier
    pub trade_id: String,
    /// Product variant name
    pub product: &'static str,
    /// Currency of the values
    pub currency: Option<String>,
    /// Present value
    pub present_value: Option<f64>,
    /// Future value
    pub future_value: Option<f64>,
    /// Why the trade could not be priced
    pub error: Option<String>,
}

/// Run the price command
pub fn run(portfolio: &Path, market: &Path, config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    info!("Starting pricing...");
    info!("  Portfolio: {}", portfolio.display());
    info!("  Market: {}", market.display());
    info!("  Output format: {}", config.output_format);

    let inputs = PricingInputs::load(portfolio, market, config)?;
    let registry = PricerRegistry::standard();
    let results = price_trades(
        &registry,
        &inputs.env,
        &inputs.ref_data,
        inputs.portfolio.trades(),
        config.parallel,
    )?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        warn!(failed, total = results.len(), "some trades could not be priced");
    }
    write_results(&results, config.output_format, out)?;

    info!("Pricing complete");
    Ok(())
}

/// Prices trades in input order, on the rayon pool when `parallel` is set.
///
/// # Errors
///
/// `CliError::Pricing` with `PricingError::UnsupportedProduct` if the
/// registry has no pricer for some trade's product.
pub fn price_trades(
    registry: &PricerRegistry,
    env: &dyn PricingEnvironment,
    ref_data: &ReferenceData,
    trades: &[Trade],
    parallel: bool,
) -> Result<Vec<PriceResult>> {
    let price = |trade: &Trade| price_trade(registry, env, ref_data, trade);
    if parallel {
        trades.par_iter().map(price).collect()
    } else {
        trades.iter().map(price).collect()
    }
}

fn price_trade(
    registry: &PricerRegistry,
    env: &dyn PricingEnvironment,
    ref_data: &ReferenceData,
    trade: &Trade,
) -> Result<PriceResult> {
    let values = || -> Result<_> {
        let resolved = trade
            .product
            .resolve(ref_data)
            .map_err(|source| CliError::Resolve {
                trade: trade.id.clone(),
                source,
            })?;
        let pv = registry.present_value(env, &resolved)?;
        let fv = registry.future_value(env, &resolved)?;
        Ok((pv, fv))
    };

    let mut result = PriceResult {
        trade_id: trade.id.clone(),
        product: trade.product.kind().name(),
        currency: None,
        present_value: None,
        future_value: None,
        error: None,
    };
    match values() {
        Ok((pv, fv)) => {
            result.currency = Some(pv.currency().to_string());
            result.present_value = Some(pv.amount());
            result.future_value = Some(fv.amount());
        }
        Err(err @ CliError::Pricing(PricingError::UnsupportedProduct { .. })) => return Err(err),
        Err(err) => {
            warn!(trade = %trade.id, error = %err, "trade not priced");
            result.error = Some(err.to_string());
        }
    }
    Ok(result)
}

/// Writes results in the requested format.
pub fn write_results(results: &[PriceResult], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, results)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let rows: Vec<Vec<String>> = results.iter().map(|r| row(r, None)).collect();
            write_csv(&headers(), &rows, out)?;
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = results.iter().map(|r| row(r, Some(2))).collect();
            write_table(&headers(), &rows, out)?;
        }
    }
    Ok(())
}

fn headers() -> Vec<String> {
    HEADERS.iter().map(|h| h.to_string()).collect()
}

fn row(result: &PriceResult, precision: Option<usize>) -> Vec<String> {
    let number = |value: Option<f64>| match (value, precision) {
        (Some(v), Some(p)) => format!("{:.*}", p, v),
        (Some(v), None) => v.to_string(),
        (None, _) => String::new(),
    };
    vec![
        result.trade_id.clone(),
        result.product.to_string(),
        result.currency.clone().unwrap_or_default(),
        number(result.present_value),
        number(result.future_value),
        result.error.clone().unwrap_or_default(),
    ]
}
