//! Pure conversions from raw provider responses into tidy tables.

pub mod marketplace;
pub mod quote_row;
pub mod ratio_report;
pub mod series;
pub mod statements;

use std::str::FromStr;

use rust_decimal::Decimal;
use tidyq_core::TidyqError;

/// Markers providers use for an absent observation.
const MISSING: [&str; 4] = ["", "N/A", "-", "—"];

pub(crate) fn is_missing(cell: &str) -> bool {
    MISSING.contains(&cell.trim())
}

/// Parse a plain decimal, tolerating thousands separators and scientific notation.
pub(crate) fn parse_decimal(cell: &str) -> Option<Decimal> {
    if is_missing(cell) {
        return None;
    }
    let cleaned: String = cell.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// Split one CSV line into trimmed fields, honouring quotes.
pub(crate) fn split_csv_line(line: &str, source: &str) -> Result<Vec<String>, TidyqError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    match rdr.records().next() {
        None => Ok(Vec::new()),
        Some(Ok(rec)) => Ok(rec.iter().map(|f| f.trim().to_string()).collect()),
        Some(Err(e)) => Err(TidyqError::upstream(source, format!("malformed CSV line: {e}"))),
    }
}
