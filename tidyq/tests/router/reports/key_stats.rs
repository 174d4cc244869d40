use rust_decimal::Decimal;
use tidyq::{GetOptions, GetOutput, TidyqError, Value};

use crate::helpers::{AAPL, BAD, MSFT, as_of, d, fixture_tq, table, texts};

fn opts() -> GetOptions {
    GetOptions::new().as_of(as_of())
}

#[tokio::test]
async fn snapshot_is_one_row_with_sorted_typed_columns() {
    let tq = fixture_tq();
    let report = tq.get(AAPL, &["key.stats"], &opts()).await.unwrap();
    let t = table(&report);

    assert_eq!(t.len(), 1);
    assert_eq!(t.width(), 32);
    let mut sorted = t.columns().to_vec();
    sorted.sort();
    assert_eq!(t.columns(), sorted.as_slice());

    assert_eq!(texts(t, "Name"), vec!["Apple Inc."]);
    assert_eq!(
        t.value(0, "Average.Daily.Volume"),
        Some(&Value::from(31_084_000_i64))
    );
    assert_eq!(
        t.value(0, "Change.in.Percent").and_then(Value::as_number),
        Some(Decimal::new(-18, 4))
    );
    assert_eq!(
        t.value(0, "Ex.Dividend.Date").and_then(Value::as_date),
        Some(d(2016, 11, 3))
    );
    assert_eq!(
        t.value(0, "Market.Capitalization").and_then(Value::as_number),
        Some(Decimal::from(626_440_000_000_i64))
    );
    assert_eq!(
        t.value(0, "1.yr.Target.Price").and_then(Value::as_number),
        Some(Decimal::new(13_490, 2))
    );
}

#[tokio::test]
async fn all_missing_fields_mean_no_data() {
    let tq = fixture_tq();
    let report = tq.get("EMPTY", &["key.stats"], &opts()).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NoDataAvailable { .. })
    ));
}

#[tokio::test]
async fn unknown_symbol_is_not_found() {
    let tq = fixture_tq();
    let report = tq.get(BAD, &["key.stats"], &opts()).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NotFound { .. })
    ));
}

#[tokio::test]
async fn batch_flattens_to_one_row_per_symbol() {
    let tq = fixture_tq();
    let report = tq.get([AAPL, MSFT], &["key.stats"], &opts()).await.unwrap();
    let t = table(&report);
    assert_eq!(t.len(), 2);
    assert_eq!(t.width(), 33);
    assert_eq!(texts(t, "symbol"), vec![AAPL, MSFT]);
    assert_eq!(texts(t, "Name"), vec!["Apple Inc.", "Microsoft Corporation"]);
}
