// Re-export helpers so tests can `use crate::helpers::*;`
#![allow(dead_code)]

pub mod mock_connector;

pub use mock_connector::ScriptedConnector;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tidyq::{
    Diagnostic, DiagnosticKind, GetOptions, GetReport, StaticCredentials, TidyTable, Tidyq,
    TidyqBuilder, Value,
};
use tidyq_mock::MockConnector;

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";
pub const GE: &str = "GE";
pub const BAD: &str = "XYZBADTICKER";

/// Reference date used unless a test needs a specific one.
pub const AS_OF: (i32, u32, u32) = (2018, 6, 29);

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

pub fn as_of() -> NaiveDate {
    d(AS_OF.0, AS_OF.1, AS_OF.2)
}

/// Options with an explicit window and the shared reference date.
pub fn window(from: NaiveDate, to: NaiveDate) -> GetOptions {
    GetOptions::new().from(from).to(to).as_of(as_of())
}

/// The first trading week of 2016 (Jan 4-8 in the fixtures).
pub fn jan_2016() -> GetOptions {
    window(d(2016, 1, 1), d(2016, 1, 10))
}

/// Builder over the fixture connector with a configured marketplace key.
pub fn fixture_builder() -> TidyqBuilder {
    Tidyq::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .credentials(Arc::new(StaticCredentials::new("test-key")))
}

pub fn fixture_tq() -> Tidyq {
    fixture_builder().build().expect("valid builder")
}

pub fn table(report: &GetReport) -> &TidyTable {
    report
        .output
        .as_table()
        .unwrap_or_else(|| panic!("expected a flat table, got {:?}", report.output))
}

pub fn count_kind(warnings: &[Diagnostic], pred: impl Fn(&DiagnosticKind) -> bool) -> usize {
    warnings.iter().filter(|w| pred(&w.kind)).count()
}

pub fn dates(t: &TidyTable, col: &str) -> Vec<NaiveDate> {
    t.column(col)
        .expect("date column")
        .filter_map(Value::as_date)
        .collect()
}

pub fn numbers(t: &TidyTable, col: &str) -> Vec<Decimal> {
    t.column(col)
        .expect("numeric column")
        .filter_map(Value::as_number)
        .collect()
}

pub fn texts<'a>(t: &'a TidyTable, col: &str) -> Vec<&'a str> {
    t.column(col)
        .expect("text column")
        .filter_map(Value::as_text)
        .collect()
}
