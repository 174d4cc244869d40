use tidyq::{GetOutput, TidyqError};

use crate::helpers::{d, dates, fixture_tq, table, window};

#[tokio::test]
async fn economic_series_uses_date_and_price_columns() {
    let tq = fixture_tq();
    let report = tq
        .get("CPIAUCSL", &["economic.data"], &window(d(2016, 1, 1), d(2016, 6, 30)))
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.columns(), &["date", "price"]);
    assert_eq!(
        dates(t, "date"),
        (1..=6).map(|m| d(2016, m, 1)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn quarterly_codes_keep_their_native_frequency() {
    let tq = fixture_tq();
    let report = tq
        .get("GDP", &["economic.data"], &window(d(2015, 1, 1), d(2015, 12, 31)))
        .await
        .unwrap();
    assert_eq!(
        dates(table(&report), "date"),
        vec![d(2015, 1, 1), d(2015, 4, 1), d(2015, 7, 1), d(2015, 10, 1)]
    );
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let tq = fixture_tq();
    let report = tq
        .get("NOTACODE", &["economic.data"], &window(d(2015, 1, 1), d(2015, 12, 31)))
        .await
        .unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NotFound { .. })
    ));
}
