//! Neutryx CLI - Command Line Operations for Product Valuation
//!
//! This is the operational entry point for the Neutryx valuation library.
//!
//! # Commands
//!
//! - `neutryx price --portfolio <file> --market <file>` - Price a portfolio of trades
//! - `neutryx explain --portfolio <file> --market <file> --trade <id>` - Cash flow report of one trade
//! - `neutryx check` - Show configuration, pricers and reference data
//!
//! # Configuration
//!
//! Settings come from, highest priority first: command line arguments,
//! `NEUTRYX_*` environment variables, `neutryx.toml`, built-in defaults.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod format;
mod market;
mod portfolio;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel};

/// Neutryx Valuation Library CLI
#[derive(Parser)]
#[command(name = "neutryx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (same as --log-level info)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a portfolio of trades
    Price {
        /// Path to portfolio file (JSON)
        #[arg(short, long)]
        portfolio: PathBuf,

        /// Path to market data file (JSON)
        #[arg(short, long)]
        market: PathBuf,

        /// Valuation date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Output format (table, csv, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Price trades one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Print the cash flow report of one trade
    Explain {
        /// Path to portfolio file (JSON)
        #[arg(short, long)]
        portfolio: PathBuf,

        /// Path to market data file (JSON)
        #[arg(short, long)]
        market: PathBuf,

        /// Trade identifier
        #[arg(short, long)]
        trade: String,

        /// Valuation date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Output format (table, csv)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Check system configuration and registered pricers
    Check,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let log_level = self
            .log_level
            .clone()
            .or_else(|| self.verbose.then(|| LogLevel::Info.to_string()));
        let mut args = CliArgs {
            config_file: self.config.clone(),
            log_level,
            ..Default::default()
        };
        match &self.command {
            Commands::Price {
                date,
                format,
                sequential,
                ..
            } => {
                args.valuation_date = date.clone();
                args.output_format = format.clone();
                args.parallel = sequential.then_some(false);
            }
            Commands::Explain { date, format, .. } => {
                args.valuation_date = date.clone();
                args.output_format = format.clone();
            }
            Commands::Check => {}
        }
        args
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level);
    info!("Configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Price {
            portfolio, market, ..
        } => commands::price::run(&portfolio, &market, &config, &mut out)?,
        Commands::Explain {
            portfolio,
            market,
            trade,
            ..
        } => commands::explain::run(&portfolio, &market, &trade, &config, &mut out)?,
        Commands::Check => commands::check::run(&config, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
