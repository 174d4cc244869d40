//! Body decoders for each upstream format.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tidyq_core::{
    MarketplaceFrame, MarketplacePage, RawSeries, SeriesKind, SeriesPoint, TidyqError,
};

use crate::NAME;

fn fault(msg: impl Into<String>) -> TidyqError {
    TidyqError::upstream(NAME, msg)
}

fn cell(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "." || raw.eq_ignore_ascii_case("null") {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Parse a split cell: `7:1` (new:old) or `1/7` (ratio) into new-per-old.
fn split_ratio(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if let Some((new, old)) = raw.split_once(':') {
        let (new, old) = (cell(new)?, cell(old)?);
        return old.checked_div(new).map(|r| r.round_dp(6));
    }
    if let Some((num, den)) = raw.split_once('/') {
        return cell(num)?.checked_div(cell(den)?).map(|r| r.round_dp(6));
    }
    cell(raw)
}

fn date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
}

/// Read a CSV body into its header and records.
fn read_csv(body: &str) -> Result<(Vec<String>, Vec<csv::StringRecord>), TidyqError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| fault(format!("malformed CSV header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    let records = rdr
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| fault(format!("malformed CSV row: {e}")))?;
    Ok((headers, records))
}

fn column(headers: &[String], name: &str) -> Result<usize, TidyqError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| fault(format!("missing column '{name}' in {headers:?}")))
}

/// Yahoo download CSV for prices, dividends or splits.
pub(crate) fn yahoo_history(body: &str, kind: SeriesKind) -> Result<RawSeries, TidyqError> {
    let (headers, records) = read_csv(body)?;
    let date_col = column(&headers, "Date")?;
    let wanted: &[(&str, &str)] = match kind {
        SeriesKind::Prices => &[
            ("Open", "Open"),
            ("High", "High"),
            ("Low", "Low"),
            ("Close", "Close"),
            ("Volume", "Volume"),
            ("Adj Close", "Adjusted"),
        ],
        SeriesKind::Dividends => &[("Dividends", "Dividends")],
        SeriesKind::Splits => &[("Stock Splits", "Splits")],
        other => return Err(fault(format!("{other:?} is not served by the history download"))),
    };
    let cols = wanted
        .iter()
        .map(|(h, _)| column(&headers, h))
        .collect::<Result<Vec<_>, _>>()?;

    let mut points = Vec::with_capacity(records.len());
    for rec in &records {
        let Some(d) = rec.get(date_col).and_then(date) else {
            continue;
        };
        let values = cols
            .iter()
            .map(|&c| {
                let raw = rec.get(c).unwrap_or_default();
                if kind == SeriesKind::Splits {
                    split_ratio(raw)
                } else {
                    cell(raw)
                }
            })
            .collect();
        points.push(SeriesPoint { date: d, values });
    }
    Ok(RawSeries {
        fields: wanted.iter().map(|(_, f)| (*f).to_string()).collect(),
        points,
    })
}

/// FRED graph CSV: a date column followed by one value column named after the series.
pub(crate) fn fred_csv(body: &str) -> Result<RawSeries, TidyqError> {
    let (headers, records) = read_csv(body)?;
    if headers.len() < 2 {
        return Err(fault(format!("expected date and value columns, got {headers:?}")));
    }
    let points = records
        .iter()
        .filter_map(|rec| {
            Some(SeriesPoint {
                date: date(rec.get(0)?)?,
                values: vec![rec.get(1).and_then(cell)],
            })
        })
        .collect();
    Ok(RawSeries {
        fields: vec![headers[1].clone()],
        points,
    })
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    response: Vec<RateCandle>,
}

#[derive(Debug, Deserialize)]
struct RateCandle {
    close_time: String,
    average_bid: serde_json::Value,
    average_ask: serde_json::Value,
}

fn json_decimal(v: &serde_json::Value) -> Option<Decimal> {
    match v {
        serde_json::Value::String(s) => cell(s),
        serde_json::Value::Number(n) => cell(&n.to_string()),
        _ => None,
    }
}

/// Daily rate candles; the value is the bid/ask midpoint.
pub(crate) fn oanda_rates(body: &str, pair: &str) -> Result<RawSeries, TidyqError> {
    let parsed: RatesResponse =
        serde_json::from_str(body).map_err(|e| fault(format!("malformed rates JSON: {e}")))?;
    let two = Decimal::from(2);
    let points = parsed
        .response
        .iter()
        .filter_map(|c| {
            let mid = match (json_decimal(&c.average_bid), json_decimal(&c.average_ask)) {
                (Some(b), Some(a)) => Some(((b + a) / two).round_dp(6)),
                (Some(x), None) | (None, Some(x)) => Some(x),
                (None, None) => None,
            };
            Some(SeriesPoint {
                date: date(&c.close_time)?,
                values: vec![mid],
            })
        })
        .collect();
    Ok(RawSeries {
        fields: vec![pair.to_string()],
        points,
    })
}

#[derive(Debug, Deserialize)]
struct DatasetEnvelope {
    dataset_data: DatasetData,
}

#[derive(Debug, Deserialize)]
struct DatasetData {
    column_names: Vec<String>,
    data: Vec<Vec<serde_json::Value>>,
}

/// Marketplace dataset JSON.
pub(crate) fn quandl_dataset(body: &str) -> Result<MarketplaceFrame, TidyqError> {
    let env: DatasetEnvelope =
        serde_json::from_str(body).map_err(|e| fault(format!("malformed dataset JSON: {e}")))?;
    Ok(MarketplaceFrame {
        columns: env.dataset_data.column_names,
        rows: env.dataset_data.data,
    })
}

#[derive(Debug, Deserialize)]
struct DatatableEnvelope {
    datatable: Datatable,
    #[serde(default)]
    meta: DatatableMeta,
}

#[derive(Debug, Deserialize)]
struct Datatable {
    data: Vec<Vec<serde_json::Value>>,
    columns: Vec<DatatableColumn>,
}

#[derive(Debug, Deserialize)]
struct DatatableColumn {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct DatatableMeta {
    next_cursor_id: Option<String>,
}

/// One page of marketplace datatable JSON.
pub(crate) fn quandl_datatable(body: &str) -> Result<MarketplacePage, TidyqError> {
    let env: DatatableEnvelope =
        serde_json::from_str(body).map_err(|e| fault(format!("malformed datatable JSON: {e}")))?;
    Ok(MarketplacePage {
        frame: MarketplaceFrame {
            columns: env.datatable.columns.into_iter().map(|c| c.name).collect(),
            rows: env.datatable.data,
        },
        next_cursor: env.meta.next_cursor_id.filter(|c| !c.is_empty()),
    })
}
