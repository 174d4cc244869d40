//! Quote-statistics snapshot: one declarative tag table drives the request
//! and the per-field coercion.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tidyq_core::{TidyTable, TidyqError, Value};

use super::{is_missing, parse_decimal};

/// How a quote field is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Number, optionally with a K/M/B/T magnitude suffix.
    Numeric,
    /// Percentage string, converted to a fraction.
    Percent,
    /// Month/day/year date.
    Date,
    /// Amount with a leading currency symbol.
    Currency,
    /// Plain string.
    Text,
}

/// One requested quote field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteTag {
    /// Upstream tag code.
    pub tag: &'static str,
    /// Output column name.
    pub field: &'static str,
    /// Coercion applied to the raw cell.
    pub kind: FieldType,
}

const fn tag(tag: &'static str, field: &'static str, kind: FieldType) -> QuoteTag {
    QuoteTag { tag, field, kind }
}

/// Requested fields, in request order.
pub const QUOTE_TAGS: [QuoteTag; 32] = [
    tag("a", "Ask", FieldType::Numeric),
    tag("a2", "Average.Daily.Volume", FieldType::Numeric),
    tag("a5", "Ask.Size", FieldType::Numeric),
    tag("b", "Bid", FieldType::Numeric),
    tag("b4", "Book.Value", FieldType::Numeric),
    tag("c1", "Change", FieldType::Numeric),
    tag("c4", "Currency", FieldType::Text),
    tag("d", "Dividend.per.Share", FieldType::Numeric),
    tag("d1", "Last.Trade.Date", FieldType::Date),
    tag("e", "EPS", FieldType::Numeric),
    tag("e7", "EPS.Estimate.Current.Year", FieldType::Numeric),
    tag("f6", "Float.Shares", FieldType::Numeric),
    tag("g", "Days.Low", FieldType::Numeric),
    tag("h", "Days.High", FieldType::Numeric),
    tag("j", "52.week.Low", FieldType::Numeric),
    tag("j1", "Market.Capitalization", FieldType::Numeric),
    tag("j4", "EBITDA", FieldType::Numeric),
    tag("k", "52.week.High", FieldType::Numeric),
    tag("l1", "Last.Trade.Price.Only", FieldType::Numeric),
    tag("m6", "Percent.Change.From.200.day.Moving.Average", FieldType::Percent),
    tag("m8", "Percent.Change.From.50.day.Moving.Average", FieldType::Percent),
    tag("n", "Name", FieldType::Text),
    tag("o", "Open", FieldType::Numeric),
    tag("p", "Previous.Close", FieldType::Numeric),
    tag("p2", "Change.in.Percent", FieldType::Percent),
    tag("q", "Ex.Dividend.Date", FieldType::Date),
    tag("r", "PE.Ratio", FieldType::Numeric),
    tag("s6", "Revenue", FieldType::Numeric),
    tag("t8", "1.yr.Target.Price", FieldType::Currency),
    tag("v", "Volume", FieldType::Numeric),
    tag("x", "Stock.Exchange", FieldType::Text),
    tag("y", "Dividend.Yield", FieldType::Numeric),
];

/// Tag codes in request order.
#[must_use]
pub fn tag_codes() -> Vec<&'static str> {
    QUOTE_TAGS.iter().map(|t| t.tag).collect()
}

fn parse_magnitude(cell: &str) -> Option<Decimal> {
    let c = cell.trim();
    let (digits, scale) = match c.chars().last()? {
        'K' | 'k' => (&c[..c.len() - 1], 1_000_i64),
        'M' | 'm' => (&c[..c.len() - 1], 1_000_000),
        'B' | 'b' => (&c[..c.len() - 1], 1_000_000_000),
        'T' | 't' => (&c[..c.len() - 1], 1_000_000_000_000),
        _ => (c, 1),
    };
    parse_decimal(digits)?.checked_mul(Decimal::from(scale))
}

fn parse_percent(cell: &str) -> Option<Decimal> {
    let c = cell.trim().trim_end_matches('%');
    parse_decimal(c)?.checked_div(Decimal::ONE_HUNDRED)
}

fn parse_currency(cell: &str) -> Option<Decimal> {
    let c: String = cell
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | '-' | '+'))
        .collect();
    parse_decimal(&c)
}

fn parse_mdy(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%m/%d/%Y").ok()
}

/// Coerce one raw cell according to its declared type; missing markers and
/// unparseable cells become null.
#[must_use]
pub fn coerce(cell: &str, kind: FieldType) -> Value {
    if is_missing(cell) {
        return Value::Null;
    }
    match kind {
        FieldType::Numeric => parse_magnitude(cell).into(),
        FieldType::Percent => parse_percent(cell).into(),
        FieldType::Currency => parse_currency(cell).into(),
        FieldType::Date => parse_mdy(cell).map_or(Value::Null, Value::from),
        FieldType::Text => Value::from(cell.trim()),
    }
}

/// Turn the wide CSV row into a one-row table with alphabetically sorted columns.
///
/// # Errors
/// `UpstreamFault` when the row width differs from the tag list,
/// `NoDataAvailable` when every field is null.
pub fn quote_row_to_table(body: &str, source: &str, what: &str) -> Result<TidyTable, TidyqError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());
    let record = match rdr.records().next() {
        Some(Ok(r)) => r,
        Some(Err(e)) => {
            return Err(TidyqError::upstream(source, format!("malformed quote row: {e}")));
        }
        None => return Err(TidyqError::no_data(what)),
    };
    if record.len() != QUOTE_TAGS.len() {
        return Err(TidyqError::upstream(
            source,
            format!(
                "quote row has {} fields, requested {}",
                record.len(),
                QUOTE_TAGS.len()
            ),
        ));
    }

    let mut fields: Vec<(&'static str, Value)> = QUOTE_TAGS
        .iter()
        .zip(record.iter())
        .map(|(t, cell)| (t.field, coerce(cell, t.kind)))
        .collect();
    if fields.iter().all(|(_, v)| v.is_null()) {
        return Err(TidyqError::no_data(what));
    }
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let (names, values): (Vec<&str>, Vec<Value>) = fields.into_iter().unzip();
    TidyTable::from_rows(names, vec![values])
}
