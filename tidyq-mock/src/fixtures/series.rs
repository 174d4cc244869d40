use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use tidyq_core::{RawSeries, SeriesKind, SeriesPoint, SeriesRequest};

use super::{date, days, is_trading_day};

/// Listed symbols and their base price in dollars.
const LISTED: [(&str, i64); 9] = [
    ("AAPL", 100),
    ("MSFT", 50),
    ("GOOG", 700),
    ("AMZN", 600),
    ("FB", 110),
    ("TSLA", 200),
    ("NFLX", 90),
    ("IBM", 150),
    ("GE", 25),
];

/// USD value of one unit of each known currency or metal, in thousandths.
const UNITS: [(&str, i64); 11] = [
    ("USD", 1_000),
    ("EUR", 1_100),
    ("GBP", 1_300),
    ("JPY", 9),
    ("CHF", 1_050),
    ("CAD", 750),
    ("AUD", 700),
    ("XAU", 1_800_000),
    ("XAG", 22_000),
    ("XPT", 950_000),
    ("XPD", 2_000_000),
];

const FRED_CODES: [&str; 5] = ["CPIAUCSL", "UNRATE", "GDP", "DGS10", "DCOILWTICO"];

fn base_price(symbol: &str) -> Option<i64> {
    LISTED.iter().find(|(s, _)| *s == symbol).map(|(_, p)| *p)
}

pub fn is_listed(symbol: &str) -> bool {
    base_price(symbol).is_some()
}

fn ordinal(d: NaiveDate) -> i64 {
    i64::from(d.num_days_from_ce())
}

/// Synthetic close in cents for `symbol` on `d`.
pub fn close_cents(base: i64, d: NaiveDate) -> i64 {
    base * 100 + (ordinal(d) % 40) * 10 + 50
}

/// Daily OHLCV bars for every trading day of the window.
pub fn prices(symbol: &str, from: NaiveDate, to: NaiveDate) -> Option<RawSeries> {
    let base = base_price(symbol)?;
    let points = days(from, to)
        .filter(|d| is_trading_day(*d))
        .map(|d| {
            let open = base * 100 + (ordinal(d) % 40) * 10;
            let close = close_cents(base, d);
            let volume = 1_000_000 + (ordinal(d) % 9) * 25_000;
            SeriesPoint {
                date: d,
                values: vec![
                    Some(Decimal::new(open, 2)),
                    Some(Decimal::new(close + 100, 2)),
                    Some(Decimal::new(open - 75, 2)),
                    Some(Decimal::new(close, 2)),
                    Some(Decimal::from(volume)),
                    Some(Decimal::new(close, 2)),
                ],
            }
        })
        .collect();
    Some(RawSeries {
        fields: ["Open", "High", "Low", "Close", "Volume", "Adjusted"]
            .map(String::from)
            .to_vec(),
        points,
    })
}

fn dated(field: &str, rows: &[(&str, Decimal)]) -> RawSeries {
    RawSeries {
        fields: vec![field.to_string()],
        points: rows
            .iter()
            .filter_map(|(d, v)| {
                Some(SeriesPoint {
                    date: date(d)?,
                    values: vec![Some(*v)],
                })
            })
            .collect(),
    }
}

/// Full dividend history; listed symbols without payouts return an empty series.
pub fn dividends(symbol: &str) -> Option<RawSeries> {
    let per_year: &[(i32, i64)] = match symbol {
        "AAPL" => &[(2015, 52), (2016, 57), (2017, 63), (2018, 73)],
        "MSFT" => &[(2015, 31), (2016, 36), (2017, 39), (2018, 42)],
        "IBM" => &[(2015, 130), (2016, 140), (2017, 150), (2018, 157)],
        s if is_listed(s) => &[],
        _ => return None,
    };
    let mut points = Vec::new();
    for &(year, cents) in per_year {
        for month in [2, 5, 8, 11] {
            if let Some(d) = NaiveDate::from_ymd_opt(year, month, 10) {
                points.push(SeriesPoint {
                    date: d,
                    values: vec![Some(Decimal::new(cents, 2))],
                });
            }
        }
    }
    Some(RawSeries {
        fields: vec!["Dividends".to_string()],
        points,
    })
}

/// Full split history as new-per-old ratios.
pub fn splits(symbol: &str) -> Option<RawSeries> {
    let rows: Vec<(&str, Decimal)> = match symbol {
        "AAPL" => vec![
            ("2005-02-28", Decimal::new(5, 1)),
            ("2014-06-09", Decimal::new(142_857, 6)),
            ("2020-08-31", Decimal::new(25, 2)),
        ],
        "MSFT" => vec![("2003-02-18", Decimal::new(5, 1))],
        "TSLA" => vec![("2020-08-31", Decimal::new(2, 1))],
        s if is_listed(s) => Vec::new(),
        _ => return None,
    };
    Some(dated("Splits", &rows))
}

/// Monthly (quarterly for GDP) history from 1990 through the window end.
pub fn economic(code: &str, to: NaiveDate) -> Option<RawSeries> {
    if !FRED_CODES.contains(&code) {
        return None;
    }
    let step = if code == "GDP" { 3 } else { 1 };
    let start = NaiveDate::from_ymd_opt(1990, 1, 1)?;
    let mut points = Vec::new();
    for i in 0_i64.. {
        let months = u32::try_from(i).ok()?.checked_mul(step)?;
        let Some(d) = start.checked_add_months(Months::new(months)) else {
            break;
        };
        if d > to {
            break;
        }
        let value = match code {
            "CPIAUCSL" => Decimal::new(12_500 + i * 25, 2),
            "UNRATE" => Decimal::new(40 + i % 60, 1),
            "GDP" => Decimal::new(5_900_000 + i * 55_000, 3),
            "DGS10" => Decimal::new(150 + (i * 7) % 500, 2),
            _ => Decimal::new(2_000 + (i * 37) % 8_000, 2),
        };
        points.push(SeriesPoint {
            date: d,
            values: vec![Some(value)],
        });
    }
    Some(RawSeries {
        fields: vec![code.to_string()],
        points,
    })
}

fn unit(code: &str) -> Option<i64> {
    UNITS.iter().find(|(c, _)| *c == code).map(|(_, u)| *u)
}

/// Daily `BASE/QUOTE` rates over every calendar day of the window.
pub fn rates(pair: &str, from: NaiveDate, to: NaiveDate) -> Option<RawSeries> {
    let (b, q) = pair.split_once('/')?;
    let (base, quote) = (unit(b)?, unit(q)?);
    let ratio = Decimal::from(base).checked_div(Decimal::from(quote))?;
    let points = days(from, to)
        .map(|d| {
            let wobble = Decimal::ONE + Decimal::new(ordinal(d) % 10, 3);
            SeriesPoint {
                date: d,
                values: vec![Some((ratio * wobble).round_dp(6))],
            }
        })
        .collect();
    Some(RawSeries {
        fields: vec![pair.to_string()],
        points,
    })
}

/// Series for a request, or `None` if the symbol is unknown.
pub fn by_request(req: &SeriesRequest) -> Option<RawSeries> {
    match req.kind {
        SeriesKind::Prices => prices(&req.symbol, req.from, req.to),
        SeriesKind::Dividends => dividends(&req.symbol),
        SeriesKind::Splits => splits(&req.symbol),
        SeriesKind::Economic => economic(&req.symbol, req.to),
        SeriesKind::Fx | SeriesKind::Metal => rates(&req.symbol, req.from, req.to),
    }
}

/// Last close of calendar year `year`, used by valuation checks.
pub fn year_end_close(symbol: &str, year: i32) -> Option<Decimal> {
    let base = base_price(symbol)?;
    let mut d = NaiveDate::from_ymd_opt(year, 12, 31)?;
    while !is_trading_day(d) {
        d = d.pred_opt()?;
    }
    Some(Decimal::new(close_cents(base, d), 2))
}
