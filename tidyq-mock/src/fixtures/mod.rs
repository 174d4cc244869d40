pub mod financials;
pub mod key_ratios;
pub mod key_stats;
pub mod marketplace;
pub mod series;

use chrono::{Datelike, NaiveDate, Weekday};

/// Calendar days of `[from, to]`, never earlier than 1990.
pub fn days(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let floor = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN);
    from.max(floor).iter_days().take_while(move |d| *d <= to)
}

/// Weekdays other than New Year's Day and Christmas.
pub fn is_trading_day(d: NaiveDate) -> bool {
    let weekend = matches!(d.weekday(), Weekday::Sat | Weekday::Sun);
    let holiday = (d.month() == 1 && d.day() == 1) || (d.month() == 12 && d.day() == 25);
    !weekend && !holiday
}

pub fn date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
