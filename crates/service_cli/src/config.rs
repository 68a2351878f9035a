//! CLI configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::Date;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file, read from the working directory if present.
pub const DEFAULT_CONFIG_FILE: &str = "neutryx.toml";

const ENV_VALUATION_DATE: &str = "NEUTRYX_VALUATION_DATE";
const ENV_LOG_LEVEL: &str = "NEUTRYX_LOG_LEVEL";
const ENV_OUTPUT_FORMAT: &str = "NEUTRYX_OUTPUT_FORMAT";
const ENV_PARALLEL: &str = "NEUTRYX_PARALLEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown output format name.
    #[error("Invalid output format: {0}. Must be one of: table, csv, json")]
    InvalidOutputFormat(String),

    /// Valuation date is not an ISO date or is out of range.
    #[error("Invalid valuation date: {0}")]
    InvalidDate(String),

    /// Boolean setting is not true or false.
    #[error("Invalid value for {name}: {value}. Must be true or false")]
    InvalidFlag {
        /// Setting name
        name: &'static str,
        /// Rejected value
        value: String,
    },

    /// Config file unreadable or not valid TOML.
    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Resolution and dispatch detail
    Debug,
    /// Command progress
    Info,
    /// Problems only, the default
    #[default]
    Warn,
    /// Failures only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Box-drawn text table
    #[default]
    Table,
    /// Comma-separated values with a header line
    Csv,
    /// JSON array
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Valuation date; when absent the market file's date is used
    pub valuation_date: Option<Date>,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_output_format")]
    pub output_format: OutputFormat,
    /// Price trades on the rayon thread pool
    pub parallel: bool,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_output_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            valuation_date: None,
            log_level: LogLevel::Warn,
            output_format: OutputFormat::Table,
            parallel: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(date) = self.valuation_date {
            if !(1900..=2200).contains(&date.year()) {
                return Err(ConfigError::InvalidDate(date.to_string()));
            }
        }
        Ok(())
    }

    /// Override fields whose variables are set.
    fn apply_lookup(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(date) = lookup(ENV_VALUATION_DATE) {
            self.valuation_date = Some(parse_date(&date)?);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(format) = lookup(ENV_OUTPUT_FORMAT) {
            self.output_format = OutputFormat::from_str(&format)?;
        }
        if let Some(parallel) = lookup(ENV_PARALLEL) {
            self.parallel = match parallel.to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidFlag {
                        name: ENV_PARALLEL,
                        value: parallel,
                    })
                }
            };
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(date) = &cli.valuation_date {
            self.valuation_date = Some(parse_date(date)?);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(format) = &cli.output_format {
            self.output_format = OutputFormat::from_str(format)?;
        }
        if let Some(parallel) = cli.parallel {
            self.parallel = parallel;
        }
        Ok(())
    }
}

fn parse_date(s: &str) -> Result<Date, ConfigError> {
    Date::parse(s).map_err(|e| ConfigError::InvalidDate(e.to_string()))
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Valuation date override
    pub valuation_date: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub output_format: Option<String>,
    /// Parallel pricing override
    pub parallel: Option<bool>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit variable lookup.
pub fn build_config_with(
    cli: &CliArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<CliConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            CliConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => CliConfig::default(),
    };

    config.apply_lookup(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.valuation_date, None);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.parallel);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(format!("{}", OutputFormat::Table), "table");
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            valuation_date = "2016-01-04"
            log_level = "debug"
            output_format = "csv"
            parallel = false
        "#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.valuation_date, Some(Date::from_ymd(2016, 1, 4).unwrap()));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: CliConfig = toml::from_str(r#"output_format = "json""#).unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.parallel);
    }

    #[test]
    fn test_bad_toml_value_is_rejected() {
        assert!(toml::from_str::<CliConfig>(r#"log_level = "loud""#).is_err());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = build_config_with(
            &CliArgs::default(),
            lookup(&[
                ("NEUTRYX_VALUATION_DATE", "2015-06-01"),
                ("NEUTRYX_LOG_LEVEL", "info"),
                ("NEUTRYX_PARALLEL", "false"),
            ]),
        )
        .unwrap();
        assert_eq!(config.valuation_date, Some(Date::from_ymd(2015, 6, 1).unwrap()));
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.parallel);
        assert_eq!(config.output_format, OutputFormat::Table);
    }

    #[test]
    fn test_bad_flag_is_rejected() {
        let err = build_config_with(
            &CliArgs::default(),
            lookup(&[("NEUTRYX_PARALLEL", "sometimes")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("NEUTRYX_PARALLEL"));
    }

    #[test]
    fn test_cli_takes_precedence_over_environment() {
        let cli = CliArgs {
            valuation_date: Some("2016-01-04".to_string()),
            output_format: Some("csv".to_string()),
            ..Default::default()
        };
        let config = build_config_with(
            &cli,
            lookup(&[
                ("NEUTRYX_VALUATION_DATE", "2015-06-01"),
                ("NEUTRYX_OUTPUT_FORMAT", "json"),
                ("NEUTRYX_LOG_LEVEL", "error"),
            ]),
        )
        .unwrap();
        assert_eq!(config.valuation_date, Some(Date::from_ymd(2016, 1, 4).unwrap()));
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn test_missing_explicit_config_file_fails() {
        let cli = CliArgs {
            config_file: Some(PathBuf::from("does/not/exist.toml")),
            ..Default::default()
        };
        assert!(matches!(
            build_config_with(&cli, lookup(&[])),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_far_dates() {
        let config = CliConfig {
            valuation_date: Some(Date::from_ymd(1850, 1, 1).unwrap()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDate(_))));
        assert!(CliConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidLogLevel("bad".to_string());
        assert!(err.to_string().contains("Invalid log level"));

        let err = ConfigError::InvalidOutputFormat("bad".to_string());
        assert!(err.to_string().contains("Invalid output format"));
    }
}
