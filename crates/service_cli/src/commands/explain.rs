//! Explain command implementation
//!
//! Prints the cash flow report of a single trade.

use std::io::Write;
use std::path::Path;

use pricer_core::explain::{CashFlowReport, ReportFormatter};
use pricer_models::products::Resolvable;
use pricer_pricing::PricerRegistry;
use tracing::info;

use super::PricingInputs;
use crate::config::{CliConfig, OutputFormat};
use crate::format::TableFormatter;
use crate::{CliError, Result};

/// Run the explain command
pub fn run(
    portfolio: &Path,
    market: &Path,
    trade_id: &str,
    config: &CliConfig,
    out: &mut dyn Write,
) -> Result<()> {
    info!("Explaining trade {}...", trade_id);

    if config.output_format == OutputFormat::Json {
        return Err(CliError::InvalidArgument(
            "explain supports table and csv output only".to_string(),
        ));
    }
    let inputs = PricingInputs::load(portfolio, market, config)?;
    let report = explain_trade(&inputs, &PricerRegistry::standard(), trade_id)?;
    write_report(&report, config.output_format, out)
}

/// Resolves one trade and builds its report.
pub fn explain_trade(
    inputs: &PricingInputs,
    registry: &PricerRegistry,
    trade_id: &str,
) -> Result<CashFlowReport> {
    let trade = inputs
        .portfolio
        .trade(trade_id)
        .ok_or_else(|| CliError::InvalidArgument(format!("no trade with id {trade_id}")))?;
    let resolved = trade
        .product
        .resolve(&inputs.ref_data)
        .map_err(|source| CliError::Resolve {
            trade: trade.id.clone(),
            source,
        })?;
    let report = registry.explain(&inputs.env, &resolved)?;
    info!(rows = report.row_count(), "report built");
    Ok(report)
}

fn write_report(report: &CashFlowReport, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let formatter = TableFormatter::default();
    match format {
        OutputFormat::Csv => report.write_csv(&formatter, out)?,
        _ => report.write_ascii_table(&formatter, out)?,
    }
    Ok(())
}
