use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tidyq_core::{MarketplaceFrame, MarketplacePage, MarketplaceQuery};

use super::series::{close_cents, prices};
use super::{date, days};

/// Rows per datatable page.
pub const PAGE_SIZE: usize = 2;

const WIKI_COLUMNS: [&str; 13] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Ex-Dividend",
    "Split Ratio",
    "Adj. Open",
    "Adj. High",
    "Adj. Low",
    "Adj. Close",
    "Adj. Volume",
];

const FUNDAMENTALS: [(&str, &str, &str, i64); 7] = [
    ("AAPL", "APPLE INC", "2016-09-30", 215_639),
    ("MSFT", "MICROSOFT CORP", "2016-06-30", 85_320),
    ("GOOG", "ALPHABET INC", "2016-12-31", 90_272),
    ("AMZN", "AMAZON.COM INC", "2016-12-31", 135_987),
    ("IBM", "INTL BUSINESS MACHINES CORP", "2016-12-31", 79_919),
    ("GE", "GENERAL ELECTRIC CO", "2016-12-31", 123_693),
    ("TSLA", "TESLA INC", "2016-12-31", 7_000),
];

fn param<'a>(query: &'a MarketplaceQuery, key: &str) -> Option<&'a str> {
    query
        .params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn window(query: &MarketplaceQuery, first: NaiveDate, last: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = param(query, "start_date").and_then(date).unwrap_or(first);
    let end = param(query, "end_date").and_then(date).unwrap_or(last);
    (start.max(first), end.min(last))
}

fn number(d: Decimal) -> Value {
    serde_json::from_str(&d.to_string()).unwrap_or(Value::Null)
}

fn wiki(symbol: &str, query: &MarketplaceQuery) -> Option<MarketplaceFrame> {
    let (from, to) = window(query, date("2017-12-01")?, date("2018-03-27")?);
    let raw = prices(symbol, from, to)?;
    // Published newest first regardless of the requested order.
    let rows = raw
        .points
        .iter()
        .rev()
        .map(|p| {
            let mut row = vec![json!(p.date.to_string())];
            row.extend(p.values[..5].iter().map(|v| v.map_or(Value::Null, number)));
            row.push(json!(0.0));
            row.push(json!(1.0));
            row.extend(p.values[..5].iter().map(|v| v.map_or(Value::Null, number)));
            row
        })
        .collect();
    Some(MarketplaceFrame {
        columns: WIKI_COLUMNS.map(String::from).to_vec(),
        rows,
    })
}

fn fred_gdp(query: &MarketplaceQuery) -> Option<MarketplaceFrame> {
    let (from, to) = window(query, date("2010-01-01")?, date("2017-12-31")?);
    let mut rows: Vec<Vec<Value>> = days(from, to)
        .filter(|d| d.day() == 1 && matches!(d.month(), 1 | 4 | 7 | 10))
        .map(|d| {
            let cents = close_cents(150, d) * 100;
            vec![json!(d.to_string()), number(Decimal::new(cents, 2))]
        })
        .collect();
    rows.reverse();
    Some(MarketplaceFrame {
        columns: vec!["Date".to_string(), "Value".to_string()],
        rows,
    })
}

/// A time-series dataset, or `None` for an unknown code.
pub fn dataset(query: &MarketplaceQuery) -> Option<MarketplaceFrame> {
    match query.code.split_once('/')? {
        ("WIKI", symbol) => wiki(symbol, query),
        ("FRED", "GDP") => fred_gdp(query),
        _ => None,
    }
}

/// One page of a datatable, or `None` for an unknown code.
///
/// `ZACKS/FC` serves one fundamentals row per ticker, optionally filtered by
/// a comma-separated `ticker` parameter, in pages of [`PAGE_SIZE`] rows.
pub fn datatable(query: &MarketplaceQuery, cursor: Option<&str>) -> Option<MarketplacePage> {
    if query.code != "ZACKS/FC" {
        return None;
    }
    let wanted: Option<Vec<&str>> =
        param(query, "ticker").map(|t| t.split(',').map(str::trim).collect());
    let rows: Vec<Vec<Value>> = FUNDAMENTALS
        .iter()
        .filter(|(t, ..)| wanted.as_ref().is_none_or(|w| w.contains(t)))
        .map(|(ticker, name, per_end, revenue)| {
            vec![
                json!(ticker),
                json!(name),
                json!(per_end),
                json!("A"),
                json!(revenue),
            ]
        })
        .collect();

    let page: usize = match cursor {
        None => 0,
        Some(c) => c.strip_prefix("page-")?.parse().ok()?,
    };
    let start = page * PAGE_SIZE;
    let chunk: Vec<Vec<Value>> = rows.iter().skip(start).take(PAGE_SIZE).cloned().collect();
    let next_cursor = (start + PAGE_SIZE < rows.len()).then(|| format!("page-{}", page + 1));
    Some(MarketplacePage {
        frame: MarketplaceFrame {
            columns: ["m_ticker", "comp_name", "per_end_date", "per_type", "tot_revnu"]
                .map(String::from)
                .to_vec(),
            rows: chunk,
        },
        next_cursor,
    })
}
