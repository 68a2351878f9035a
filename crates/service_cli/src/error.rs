//! CLI error types.

use pricer_core::reference_data::ReferenceDataError;
use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything that can stop a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// An input file is malformed or describes an invalid product.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be built.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command line argument is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A trade could not be resolved against reference data.
    #[error("Failed to resolve trade {trade}: {source}")]
    Resolve {
        /// Trade identifier
        trade: String,
        /// Underlying lookup failure
        #[source]
        source: ReferenceDataError,
    },

    /// Pricing failed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Parse(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Io(std::io::Error::other(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_names_trade_and_identifier() {
        let err = CliError::Resolve {
            trade: "SWAP-1".to_string(),
            source: ReferenceDataError::NotFound {
                id: "XXXX".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("SWAP-1"));
        assert!(message.contains("XXXX"));
    }

    #[test]
    fn test_json_error_becomes_parse_error() {
        let err: CliError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, CliError::Parse(_)));
    }
}
