//! Schedule generation error types.

use pricer_core::types::time::Date;
use thiserror::Error;

/// Errors that can occur during schedule construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Periods cannot be grouped at the requested frequency.
    #[error("Frequency {coarse} is not a multiple of {fine}")]
    IncompatibleFrequency {
        /// The grouping frequency.
        coarse: String,
        /// The underlying period frequency.
        fine: String,
    },
}
