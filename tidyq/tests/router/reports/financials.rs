use tidyq::{GetOptions, GetOutput, TidyTable, TidyqError, Value};

use crate::helpers::{AAPL, MSFT, as_of, d, fixture_tq, table, texts};

fn opts() -> GetOptions {
    GetOptions::new().as_of(as_of())
}

fn nested<'a>(t: &'a TidyTable, row: usize, col: &str) -> &'a TidyTable {
    t.value(row, col)
        .and_then(Value::as_table)
        .unwrap_or_else(|| panic!("row {row} {col} is not a table"))
}

#[tokio::test]
async fn statements_pivot_into_type_rows_with_nested_periods() {
    let tq = fixture_tq();
    let report = tq.get(AAPL, &["financials"], &opts()).await.unwrap();
    let t = table(&report);

    assert_eq!(t.columns(), &["type", "annual", "quarter"]);
    assert_eq!(texts(t, "type"), vec!["IS", "BS", "CF"]);

    let is_annual = nested(t, 0, "annual");
    assert_eq!(is_annual.columns(), &["group", "category", "date", "value"]);
    assert_eq!(is_annual.len(), 5 * 4);
    assert_eq!(is_annual.value(0, "category"), Some(&Value::from("Revenue")));
    assert_eq!(is_annual.value(0, "date"), Some(&Value::from(d(2016, 9, 24))));

    let cf_quarter = nested(t, 2, "quarter");
    assert_eq!(cf_quarter.len(), 4 * 5);
    let nulls = cf_quarter
        .column("value")
        .unwrap()
        .filter(|v| v.is_null())
        .count();
    assert_eq!(nulls, 4);
}

#[tokio::test]
async fn uncovered_symbol_fails_with_one_notice() {
    let tq = fixture_tq();
    let report = tq.get("FB", &["financials"], &opts()).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NotFound { .. })
    ));
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].message.starts_with("x = 'FB', get = 'financials': "));
}

#[tokio::test]
async fn statements_cannot_be_combined() {
    let tq = fixture_tq();
    let err = tq
        .get(AAPL, &["financials", "stock.prices"], &opts())
        .await
        .unwrap_err();
    assert!(matches!(err, TidyqError::InvalidCompoundCategory { .. }));
}

#[tokio::test]
async fn batch_flattens_to_three_rows_per_symbol() {
    let tq = fixture_tq();
    let report = tq.get([AAPL, MSFT], &["financials"], &opts()).await.unwrap();
    let t = table(&report);
    assert_eq!(t.columns(), &["symbol", "type", "annual", "quarter"]);
    assert_eq!(t.len(), 6);
    assert_eq!(texts(t, "symbol"), vec![AAPL, AAPL, AAPL, MSFT, MSFT, MSFT]);
}
