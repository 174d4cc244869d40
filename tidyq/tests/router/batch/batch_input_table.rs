use tidyq::{DiagnosticKind, GetOutput, TidyTable, TidyqError, Value};

use crate::helpers::{AAPL, MSFT, fixture_tq, jan_2016, table, texts};

fn sectors() -> TidyTable {
    TidyTable::from_rows(
        ["symbol", "sector"],
        vec![
            vec![Value::from(AAPL), Value::from("Technology")],
            vec![Value::from(MSFT), Value::from("Software")],
        ],
    )
    .unwrap()
}

#[tokio::test]
async fn input_columns_are_carried_into_the_flat_table() {
    let tq = fixture_tq();
    let report = tq
        .get(sectors(), &["stock.prices"], &jan_2016())
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.len(), 10);
    assert_eq!(&t.columns()[..3], &["symbol", "sector", "date"]);
    assert_eq!(t.columns().last().map(String::as_str), Some("adjusted"));

    let sectors = texts(t, "sector");
    assert_eq!(sectors[0], "Technology");
    assert_eq!(sectors[9], "Software");
}

#[tokio::test]
async fn symbol_column_must_hold_text() {
    let tq = fixture_tq();
    let numeric = TidyTable::from_rows(["id"], vec![vec![Value::from(7_i64)]]).unwrap();
    let err = tq
        .get(numeric, &["stock.prices"], &jan_2016())
        .await
        .unwrap_err();
    assert!(matches!(err, TidyqError::InvalidArg(_)));
}

#[tokio::test]
async fn colliding_input_column_keeps_the_nested_shape() {
    let tq = fixture_tq();
    let input = TidyTable::from_rows(
        ["symbol", "close"],
        vec![vec![Value::from(AAPL), Value::from(1_i64)]],
    )
    .unwrap();
    let report = tq.get(input, &["stock.prices"], &jan_2016()).await.unwrap();
    assert!(matches!(report.output, GetOutput::Batch(_)));
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0].kind, DiagnosticKind::FlattenSkipped));
}
