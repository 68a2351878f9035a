//! Check command implementation
//!
//! Prints the effective configuration, the registered pricers and a summary
//! of the standard reference data.

use std::io::Write;

use pricer_core::reference_data::ReferenceData;
use pricer_models::products::ProductKind;
use pricer_pricing::PricerRegistry;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    info!("Checking system configuration...");
    write_check(config, &PricerRegistry::standard(), &ReferenceData::standard(), out)?;
    info!("Check complete");
    Ok(())
}

fn write_check(
    config: &CliConfig,
    registry: &PricerRegistry,
    ref_data: &ReferenceData,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "neutryx {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;
    writeln!(out, "Configuration")?;
    match config.valuation_date {
        Some(date) => writeln!(out, "  valuation date: {date}")?,
        None => writeln!(out, "  valuation date: (from market file)")?,
    }
    writeln!(out, "  log level:      {}", config.log_level)?;
    writeln!(out, "  output format:  {}", config.output_format)?;
    writeln!(out, "  parallel:       {}", config.parallel)?;
    if config.parallel {
        writeln!(out, "  threads:        {}", rayon::current_num_threads())?;
    }

    writeln!(out)?;
    writeln!(out, "Pricers")?;
    for kind in ProductKind::ALL {
        let name = registry.pricer_name(kind).unwrap_or("(none)");
        writeln!(out, "  {:<14}{}", kind.name(), name)?;
    }

    writeln!(out)?;
    writeln!(out, "Reference data")?;
    let calendars: Vec<_> = ref_data.calendar_ids().into_iter().map(|id| id.name()).collect();
    writeln!(out, "  calendars:      {}", calendars.join(", "))?;
    writeln!(out, "  ibor indices:   {}", ref_data.ibor_index_ids().len())?;
    Ok(())
}
