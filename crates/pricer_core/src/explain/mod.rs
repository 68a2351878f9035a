//! Explain model: a uniform, instrument-agnostic trace of how a value was computed.
//!
//! - [`ExplainKey`]: fixed set of column identifiers with stable headers
//! - [`ExplainValue`]: typed cell values
//! - [`CashFlowReport`]: immutable table of explain rows
//! - [`CashFlowReportBuilder`] / [`ExplainRow`]: the construction path used by pricers
//! - [`ReportFormatter`]: rendering seam implemented outside the core

mod key;
mod report;
mod value;

pub use key::ExplainKey;
pub use report::{CashFlowReport, CashFlowReportBuilder, ExplainRow, ReportError, ReportFormatter};
pub use value::ExplainValue;
