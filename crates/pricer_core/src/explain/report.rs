//! Cash flow report: an immutable table of explain rows.
//!
//! Reports are built once and never change. Column keys, headers and rows are
//! copied into boxed slices on construction; accessors hand out borrowed
//! slices, so callers that copy and mutate the data cannot affect the report.

use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{ExplainKey, ExplainValue};
use crate::types::Date;

/// Report construction errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Keys and headers differ in length.
    #[error("Column mismatch: {keys} keys but {headers} headers")]
    ColumnMismatch {
        /// Number of column keys
        keys: usize,
        /// Number of column headers
        headers: usize,
    },

    /// A row does not have one cell per column.
    #[error("Row {row} has {found} cells, expected {expected}")]
    RowLength {
        /// Zero-based row index
        row: usize,
        /// Number of columns
        expected: usize,
        /// Number of cells in the row
        found: usize,
    },

    /// A row set a cell for a key that is not a column.
    #[error("Unknown explain column: {key}")]
    UnknownColumn {
        /// The undeclared key
        key: ExplainKey,
    },
}

/// Renders reports. Implemented by the presentation layer.
pub trait ReportFormatter {
    /// Writes the report as CSV, one header line then one line per row.
    fn write_csv(&self, report: &CashFlowReport, out: &mut dyn io::Write) -> io::Result<()>;

    /// Writes the report as a human-readable text table.
    fn write_ascii_table(&self, report: &CashFlowReport, out: &mut dyn io::Write)
        -> io::Result<()>;
}

/// Immutable cash flow report.
///
/// # Invariants
///
/// - `column_keys().len() == column_headers().len()`
/// - every row has exactly that many cells
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use pricer_core::explain::{CashFlowReport, ExplainKey, ExplainValue};
/// use pricer_core::types::Date;
///
/// let report = CashFlowReport::new(
///     Date::from_ymd(2015, 6, 15).unwrap(),
///     Utc::now(),
///     vec![ExplainKey::PaymentDate, ExplainKey::PresentValue],
///     vec!["Date".to_string(), "PV".to_string()],
///     vec![vec![ExplainValue::Empty, ExplainValue::Number(1.0)]],
/// )
/// .unwrap();
///
/// assert_eq!(report.row_count(), 1);
/// assert_eq!(report.column_headers()[1], "PV");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowReport {
    valuation_date: Date,
    run_instant: DateTime<Utc>,
    column_keys: Box<[ExplainKey]>,
    column_headers: Box<[String]>,
    data: Box<[Box<[ExplainValue]>]>,
}

impl CashFlowReport {
    /// Creates a report from explicit columns and rows.
    ///
    /// # Errors
    /// - `ReportError::ColumnMismatch` if keys and headers differ in length
    /// - `ReportError::RowLength` for the first row of the wrong length
    pub fn new(
        valuation_date: Date,
        run_instant: DateTime<Utc>,
        column_keys: Vec<ExplainKey>,
        column_headers: Vec<String>,
        data: Vec<Vec<ExplainValue>>,
    ) -> Result<Self, ReportError> {
        if column_keys.len() != column_headers.len() {
            return Err(ReportError::ColumnMismatch {
                keys: column_keys.len(),
                headers: column_headers.len(),
            });
        }
        let expected = column_keys.len();
        if let Some((row, cells)) = data.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ReportError::RowLength {
                row,
                expected,
                found: cells.len(),
            });
        }

        Ok(Self {
            valuation_date,
            run_instant,
            column_keys: column_keys.into_boxed_slice(),
            column_headers: column_headers.into_boxed_slice(),
            data: data.into_iter().map(Vec::into_boxed_slice).collect(),
        })
    }

    /// Date the values are as of.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Instant the report was produced.
    pub fn run_instant(&self) -> DateTime<Utc> {
        self.run_instant
    }

    /// Column identifiers.
    pub fn column_keys(&self) -> &[ExplainKey] {
        &self.column_keys
    }

    /// Column display headers.
    pub fn column_headers(&self) -> &[String] {
        &self.column_headers
    }

    /// All rows.
    pub fn data(&self) -> &[Box<[ExplainValue]>] {
        &self.data
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_keys.len()
    }

    /// Position of a column, if present.
    pub fn column_index(&self, key: ExplainKey) -> Option<usize> {
        self.column_keys.iter().position(|k| *k == key)
    }

    /// Cell at a row for a column key.
    pub fn value(&self, row: usize, key: ExplainKey) -> Option<&ExplainValue> {
        let column = self.column_index(key)?;
        self.data.get(row).map(|cells| &cells[column])
    }

    /// Renders as CSV through the formatter.
    pub fn write_csv(
        &self,
        formatter: &dyn ReportFormatter,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        formatter.write_csv(self, out)
    }

    /// Renders as a text table through the formatter.
    pub fn write_ascii_table(
        &self,
        formatter: &dyn ReportFormatter,
        out: &mut dyn io::Write,
    ) -> io::Result<()> {
        formatter.write_ascii_table(self, out)
    }
}

/// One explain row, with cells keyed by column.
///
/// Columns the row does not mention are left empty.
///
/// ```
/// use pricer_core::explain::{ExplainKey, ExplainRow};
///
/// let row = ExplainRow::new()
///     .with(ExplainKey::EntryType, "Cash Flow")
///     .with(ExplainKey::AccrualYearFraction, 0.25);
/// assert_eq!(row.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplainRow {
    cells: Vec<(ExplainKey, ExplainValue)>,
}

impl ExplainRow {
    /// An empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell, replacing any earlier value for the key.
    pub fn with(mut self, key: ExplainKey, value: impl Into<ExplainValue>) -> Self {
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((key, value)),
        }
        self
    }

    /// Number of cells set.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cell is set.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value of a cell, if set.
    pub fn get(&self, key: ExplainKey) -> Option<&ExplainValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Accumulates explain rows against a fixed column set.
///
/// Headers are derived from the keys, so the two cannot diverge.
#[derive(Debug, Clone)]
pub struct CashFlowReportBuilder {
    keys: Vec<ExplainKey>,
    rows: Vec<Vec<ExplainValue>>,
}

impl CashFlowReportBuilder {
    /// A builder for the given columns, in order.
    pub fn new(keys: &[ExplainKey]) -> Self {
        Self {
            keys: keys.to_vec(),
            rows: Vec::new(),
        }
    }

    /// The declared columns.
    pub fn keys(&self) -> &[ExplainKey] {
        &self.keys
    }

    /// Rows added so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends a row.
    ///
    /// # Errors
    /// `ReportError::UnknownColumn` if the row sets a key that is not a column.
    pub fn add_row(&mut self, row: ExplainRow) -> Result<(), ReportError> {
        let mut cells = vec![ExplainValue::Empty; self.keys.len()];
        for (key, value) in row.cells {
            let column = self
                .keys
                .iter()
                .position(|k| *k == key)
                .ok_or(ReportError::UnknownColumn { key })?;
            cells[column] = value;
        }
        self.rows.push(cells);
        Ok(())
    }

    /// Appends rows in order, stopping at the first invalid one.
    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = ExplainRow>) -> Result<(), ReportError> {
        rows.into_iter().try_for_each(|row| self.add_row(row))
    }

    /// Freezes the rows into a report.
    pub fn build(self, valuation_date: Date, run_instant: DateTime<Utc>) -> CashFlowReport {
        let headers: Box<[String]> = self.keys.iter().map(|k| k.header().to_string()).collect();
        CashFlowReport {
            valuation_date,
            run_instant,
            column_keys: self.keys.into_boxed_slice(),
            column_headers: headers,
            data: self.rows.into_iter().map(Vec::into_boxed_slice).collect(),
        }
    }
}
