//! Text rendering of reports and result tables.

use std::io::{self, Write};

use pricer_core::explain::{CashFlowReport, ExplainValue, ReportFormatter};

/// Renders cash flow reports as CSV or box-drawn tables.
#[derive(Debug, Clone, Copy)]
pub struct TableFormatter {
    /// Decimal places for plain numbers in tables
    pub precision: usize,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

impl TableFormatter {
    fn cell(&self, value: &ExplainValue) -> String {
        match value {
            ExplainValue::Number(n) => format!("{:.*}", self.precision, n),
            other => other.to_string(),
        }
    }
}

impl ReportFormatter for TableFormatter {
    fn write_csv(&self, report: &CashFlowReport, out: &mut dyn Write) -> io::Result<()> {
        let rows: Vec<Vec<String>> = report
            .data()
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        write_csv(report.column_headers(), &rows, out)
    }

    fn write_ascii_table(&self, report: &CashFlowReport, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Valuation date {}, run at {}",
            report.valuation_date(),
            report.run_instant().to_rfc3339()
        )?;
        let rows: Vec<Vec<String>> = report
            .data()
            .iter()
            .map(|row| row.iter().map(|v| self.cell(v)).collect())
            .collect();
        write_table(report.column_headers(), &rows, out)
    }
}

/// Writes a header line and rows as CSV.
pub fn write_csv(headers: &[String], rows: &[Vec<String>], out: &mut dyn Write) -> io::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(headers).map_err(io::Error::other)?;
    for row in rows {
        writer.write_record(row).map_err(io::Error::other)?;
    }
    writer.flush()
}

/// Writes headers and rows as a box-drawn table.
pub fn write_table(headers: &[String], rows: &[Vec<String>], out: &mut dyn Write) -> io::Result<()> {
    const NO_DATA: &str = "(no data)";
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    if let (true, Some(first)) = (rows.is_empty(), widths.first_mut()) {
        *first = (*first).max(NO_DATA.len());
    }
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}", segments.join(mid))
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {cell}{} ", " ".repeat(w.saturating_sub(cell.chars().count())))
            })
            .collect();
        format!("│{}│", padded.join("│"))
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(out, "{}", line(headers))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    if rows.is_empty() {
        writeln!(out, "{}", line(&[NO_DATA.to_string()][..]))?;
    }
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pricer_core::explain::{CashFlowReportBuilder, ExplainKey, ExplainRow};
    use pricer_core::types::{Currency, CurrencyAmount, Date};

    fn report() -> CashFlowReport {
        let mut builder = CashFlowReportBuilder::new(&[
            ExplainKey::EntryType,
            ExplainKey::DiscountFactor,
            ExplainKey::PresentValue,
        ]);
        builder
            .add_row(
                ExplainRow::new()
                    .with(ExplainKey::EntryType, "Future, Index")
                    .with(ExplainKey::DiscountFactor, 0.99)
                    .with(
                        ExplainKey::PresentValue,
                        CurrencyAmount::new(Currency::USD, 495.0),
                    ),
            )
            .unwrap();
        builder.build(
            Date::from_ymd(2015, 6, 1).unwrap(),
            Utc.with_ymd_and_hms(2015, 6, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_csv_quotes_and_counts_lines() {
        let mut out = Vec::new();
        TableFormatter::default()
            .write_csv(&report(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "\"Future, Index\",0.99,USD 495.00");
    }

    #[test]
    fn test_table_aligns_columns() {
        let mut out = Vec::new();
        report()
            .write_ascii_table(&TableFormatter { precision: 3 }, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().skip(1).collect();
        assert_eq!(lines.len(), 5);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(text.contains("0.990"));
    }

    #[test]
    fn test_empty_table_says_so() {
        let mut out = Vec::new();
        write_table(&["Trade".to_string()], &[], &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(no data)"));
    }
}
