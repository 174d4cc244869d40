use chrono::NaiveDate;
use tidyq_core::{RawSeries, TidyTable, TidyqError, Value};

use crate::strategy::StrategyDescriptor;

/// Reshape a native indexed series into one row per date.
///
/// Columns are the descriptor's fields (`date` first), whatever the provider
/// called them. Points outside `[from, to]` are dropped and the rest sorted
/// ascending by date.
///
/// # Errors
/// `UpstreamFault` when the provider's width differs from the declared
/// fields, `NoDataAvailable` when nothing is left in the window.
pub fn series_to_table(
    raw: RawSeries,
    desc: &StrategyDescriptor,
    from: NaiveDate,
    to: NaiveDate,
    what: &str,
) -> Result<TidyTable, TidyqError> {
    let expected = desc.fields.len().saturating_sub(1);
    if raw.fields.len() != expected {
        return Err(TidyqError::upstream(
            desc.source,
            format!(
                "schema drift: expected {expected} value fields {:?}, got {:?}",
                &desc.fields[1..],
                raw.fields
            ),
        ));
    }

    let mut points = raw.points;
    if let Some(bad) = points.iter().find(|p| p.values.len() != expected) {
        return Err(TidyqError::upstream(
            desc.source,
            format!(
                "schema drift: observation {} has {} values, expected {expected}",
                bad.date,
                bad.values.len()
            ),
        ));
    }
    points.retain(|p| p.date >= from && p.date <= to);
    points.sort_by_key(|p| p.date);

    if points.is_empty() {
        return Err(TidyqError::no_data(format!("{what} between {from} and {to}")));
    }

    let mut out = TidyTable::new(desc.fields.iter().copied());
    for p in points {
        let mut row = Vec::with_capacity(expected + 1);
        row.push(Value::from(p.date));
        row.extend(p.values.into_iter().map(Value::from));
        out.push_row(row)?;
    }
    Ok(out)
}
