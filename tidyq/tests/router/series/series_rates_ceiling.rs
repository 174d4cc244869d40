use std::sync::Arc;

use tidyq::{
    Capability, DiagnosticKind, GetOptions, GetOutput, StaticCredentials, Tidyq, TidyqError,
};
use tidyq_mock::DynamicMockConnector;

use crate::helpers::{as_of, count_kind, d, dates, fixture_tq, table, window};

#[tokio::test]
async fn window_before_the_ceiling_fails_without_an_upstream_call() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("rates");
    let tq = Tidyq::builder()
        .with_connector(mock)
        .credentials(Arc::new(StaticCredentials::none()))
        .build()
        .unwrap();

    let report = tq
        .get("EUR/USD", &["exchange.rates"], &window(d(2016, 1, 1), d(2016, 1, 10)))
        .await
        .unwrap();
    match &report.output {
        GetOutput::Failed(TidyqError::WindowOutOfRange {
            ceiling_days,
            earliest,
            ..
        }) => {
            assert_eq!(*ceiling_days, 180);
            assert_eq!(earliest, "2017-12-31");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(report.warnings[0].message.contains("180 day limit"));
    assert_eq!(controller.call_count(Capability::TimeSeries).await, 0);
}

#[tokio::test]
async fn early_start_is_clamped_with_a_notice() {
    let tq = fixture_tq();
    let report = tq
        .get("gold", &["metal.prices"], &window(d(2017, 6, 1), as_of()))
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.columns(), &["date", "price"]);
    let days = dates(t, "date");
    assert_eq!(days.first().copied(), Some(d(2017, 12, 31)));
    assert_eq!(days.len(), 181);

    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0].kind {
        DiagnosticKind::PartialWindow { effective_from } => {
            assert_eq!(effective_from, "2017-12-31");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn default_window_is_the_ceiling_without_a_notice() {
    let tq = fixture_tq();
    let report = tq
        .get("eur/usd", &["exchange.rates"], &GetOptions::new().as_of(as_of()))
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.columns(), &["date", "exchange.rate"]);
    assert_eq!(t.len(), 181);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn malformed_pair_is_not_found() {
    let tq = fixture_tq();
    let opts = GetOptions::new().as_of(as_of());
    let report = tq.get("EURUSD", &["exchange.rates"], &opts).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NotFound { .. })
    ));
    let report = tq.get("copper", &["metal.prices"], &opts).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NotFound { .. })
    ));
}

#[tokio::test]
async fn batch_entirely_out_of_range_flattens_to_an_empty_table() {
    let tq = fixture_tq();
    let report = tq
        .get(
            ["EUR/USD", "GBP/USD"],
            &["exchange.rates"],
            &window(d(2016, 1, 1), d(2016, 1, 10)),
        )
        .await
        .unwrap();
    let t = table(&report);
    assert!(t.is_empty());
    assert_eq!(t.columns(), &["symbol", "date", "exchange.rate"]);
    assert_eq!(
        count_kind(&report.warnings, |k| matches!(k, DiagnosticKind::Dropped(_))),
        2
    );
}
