use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tidyq_core::{MarketplaceFrame, TidyTable, TidyqError, Value};

/// Normalize a published column name to lowercase-dot form
/// (`"Adj. Close"` → `"adj.close"`). Underscores are kept; any run of other
/// separators collapses to one dot.
#[must_use]
pub fn normalize_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dot = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if pending_dot && !out.is_empty() {
                out.push('.');
            }
            pending_dot = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dot = true;
        }
    }
    out
}

fn json_cell(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .map_or(Value::Text(s), Value::Number)
        }
        serde_json::Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_or_else(|_| Value::from(s.as_str()), Value::from),
        serde_json::Value::Bool(b) => Value::from(b.to_string()),
        other => Value::from(other.to_string()),
    }
}

/// Convert a marketplace frame into a tidy table with normalized column names,
/// ascending by `date` when such a column exists.
///
/// # Errors
/// `UpstreamFault` for ragged rows or two published names that normalize to
/// the same column, `NoDataAvailable` for an empty frame.
pub fn frame_to_table(
    frame: &MarketplaceFrame,
    source: &str,
    what: &str,
) -> Result<TidyTable, TidyqError> {
    if frame.rows.is_empty() {
        return Err(TidyqError::no_data(what));
    }
    let names: Vec<String> = frame.columns.iter().map(|c| normalize_column_name(c)).collect();
    let mut seen = HashSet::with_capacity(names.len());
    if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(TidyqError::upstream(
            source,
            format!("published columns collide on '{dup}' after normalization"),
        ));
    }
    let mut t = TidyTable::new(names);
    for row in &frame.rows {
        if row.len() != frame.columns.len() {
            return Err(TidyqError::upstream(
                source,
                format!(
                    "row has {} cells but {} columns were published",
                    row.len(),
                    frame.columns.len()
                ),
            ));
        }
        t.push_row(row.iter().map(json_cell).collect())?;
    }
    if t.column_index("date").is_some() {
        t.sort_by_column("date")?;
    }
    Ok(t)
}
