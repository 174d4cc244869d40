use tidyq_core::{RawFinancials, StatementPeriod, StatementType, TidyTable, TidyqError, Value};

const LONG_COLUMNS: [&str; 4] = ["group", "category", "date", "value"];

/// Gather wide statements into long sub-tables and pivot them into one row per
/// statement type (`IS`, `BS`, `CF`) with `annual` and `quarter` cells.
///
/// # Errors
/// `UpstreamFault` when a line's width differs from its statement's period
/// count, `NoDataAvailable` when every statement is empty.
pub fn financials_to_table(
    raw: &RawFinancials,
    source: &str,
    what: &str,
) -> Result<TidyTable, TidyqError> {
    let mut out = TidyTable::new(["type", "annual", "quarter"]);
    let mut any = false;
    for ty in StatementType::ALL {
        let annual = gather(raw, ty, StatementPeriod::Annual, source)?;
        let quarter = gather(raw, ty, StatementPeriod::Quarterly, source)?;
        any |= !annual.is_empty() || !quarter.is_empty();
        out.push_row(vec![
            Value::from(ty.code()),
            Value::from(annual),
            Value::from(quarter),
        ])?;
    }
    if !any {
        return Err(TidyqError::no_data(what));
    }
    Ok(out)
}

fn gather(
    raw: &RawFinancials,
    ty: StatementType,
    period: StatementPeriod,
    source: &str,
) -> Result<TidyTable, TidyqError> {
    let mut t = TidyTable::new(LONG_COLUMNS);
    let Some(st) = raw
        .statements
        .iter()
        .find(|s| s.statement == ty && s.period == period)
    else {
        return Ok(t);
    };
    for (ordinal, line) in (1_i64..).zip(&st.lines) {
        if line.values.len() != st.periods.len() {
            return Err(TidyqError::upstream(
                source,
                format!(
                    "{} {} line '{}' has {} values for {} periods",
                    ty.code(),
                    period.column(),
                    line.category,
                    line.values.len(),
                    st.periods.len()
                ),
            ));
        }
        for (date, value) in st.periods.iter().zip(&line.values) {
            t.push_row(vec![
                Value::from(ordinal),
                Value::from(line.category.as_str()),
                Value::from(*date),
                Value::from(*value),
            ])?;
        }
    }
    Ok(t)
}
