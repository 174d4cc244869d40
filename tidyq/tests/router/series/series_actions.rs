use rust_decimal::Decimal;
use tidyq::{GetOutput, TidyqError};

use crate::helpers::{AAPL, GE, d, dates, fixture_tq, numbers, table, window};

#[tokio::test]
async fn dividends_are_filtered_to_the_window() {
    let tq = fixture_tq();
    let report = tq
        .get(AAPL, &["dividends"], &window(d(2016, 1, 1), d(2016, 12, 31)))
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.columns(), &["date", "dividends"]);
    assert_eq!(
        dates(t, "date"),
        vec![d(2016, 2, 10), d(2016, 5, 10), d(2016, 8, 10), d(2016, 11, 10)]
    );
    assert!(numbers(t, "dividends").iter().all(|v| *v == Decimal::new(57, 2)));
}

#[tokio::test]
async fn splits_are_new_per_old_ratios() {
    let tq = fixture_tq();
    let report = tq
        .get(AAPL, &["splits"], &window(d(2014, 1, 1), d(2014, 12, 31)))
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.columns(), &["date", "splits"]);
    assert_eq!(dates(t, "date"), vec![d(2014, 6, 9)]);
    assert_eq!(numbers(t, "splits"), vec![Decimal::new(142_857, 6)]);
}

#[tokio::test]
async fn listed_symbol_without_actions_has_no_data() {
    let tq = fixture_tq();
    let report = tq
        .get(GE, &["splits"], &window(d(2000, 1, 1), d(2018, 1, 1)))
        .await
        .unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NoDataAvailable { .. })
    ));
    assert_eq!(report.warnings.len(), 1);
}
