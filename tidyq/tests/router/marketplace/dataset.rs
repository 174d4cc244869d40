use std::sync::Arc;

use serde_json::json;
use tidyq::{DiagnosticKind, GetOptions, GetOutput, StaticCredentials, Tidyq, TidyqError};
use tidyq_core::MarketplaceFrame;
use tidyq_mock::{DynamicMockConnector, MockBehavior};

use crate::helpers::{as_of, count_kind, d, dates, fixture_builder, fixture_tq, table, window};

fn early_2018() -> GetOptions {
    window(d(2018, 1, 2), d(2018, 1, 5))
}

#[tokio::test]
async fn dataset_is_windowed_ascending_and_order_is_forced() {
    let tq = fixture_tq();
    let opts = early_2018().param("order", "desc");
    let report = tq.get("WIKI/AAPL", &["quandl"], &opts).await.unwrap();
    let t = table(&report);

    assert_eq!(
        dates(t, "date"),
        vec![d(2018, 1, 2), d(2018, 1, 3), d(2018, 1, 4), d(2018, 1, 5)]
    );
    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0].kind {
        DiagnosticKind::PolicyOverride {
            option,
            requested,
            applied,
        } => {
            assert_eq!(option, "order");
            assert_eq!(requested, "desc");
            assert_eq!(applied, "asc");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn published_column_names_are_normalized() {
    let tq = fixture_tq();
    let report = tq.get("WIKI/MSFT", &["quandl"], &early_2018()).await.unwrap();
    let t = table(&report);
    assert_eq!(
        t.columns(),
        &[
            "date",
            "open",
            "high",
            "low",
            "close",
            "volume",
            "ex.dividend",
            "split.ratio",
            "adj.open",
            "adj.high",
            "adj.low",
            "adj.close",
            "adj.volume"
        ]
    );
}

#[tokio::test]
async fn type_and_meta_are_overridden_but_matching_values_are_silent() {
    let tq = fixture_tq();
    let opts = early_2018()
        .param("type", "numpy")
        .param("meta", "TRUE")
        .param("order", "asc");
    let report = tq.get("WIKI/AAPL", &["quandl"], &opts).await.unwrap();
    assert_eq!(table(&report).len(), 4);
    assert_eq!(
        count_kind(&report.warnings, |k| matches!(
            k,
            DiagnosticKind::PolicyOverride { .. }
        )),
        2
    );
}

#[tokio::test]
async fn missing_key_is_reported_but_the_call_proceeds() {
    let tq = fixture_builder()
        .credentials(Arc::new(StaticCredentials::none()))
        .build()
        .unwrap();
    let report = tq.get("WIKI/AAPL", &["quandl"], &early_2018()).await.unwrap();
    assert_eq!(table(&report).len(), 4);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        report.warnings[0].kind,
        DiagnosticKind::MissingCredential
    ));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let tq = fixture_tq();
    let report = tq
        .get("NOPE/NOTHING", &["quandl"], &GetOptions::new().as_of(as_of()))
        .await
        .unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NotFound { .. })
    ));
}

async fn dynamic_with_frame(frame: MarketplaceFrame) -> Tidyq {
    let (mock, controller) = DynamicMockConnector::new_with_controller("frames");
    controller
        .set_dataset_behavior("TEST/FRAME", MockBehavior::Return(frame))
        .await;
    Tidyq::builder()
        .with_connector(mock)
        .credentials(Arc::new(StaticCredentials::new("k")))
        .build()
        .unwrap()
}

#[tokio::test]
async fn ragged_frame_is_an_upstream_fault() {
    let tq = dynamic_with_frame(MarketplaceFrame {
        columns: vec!["Date".into(), "Value".into()],
        rows: vec![vec![json!("2018-01-02")]],
    })
    .await;
    let report = tq
        .get("TEST/FRAME", &["quandl"], &early_2018())
        .await
        .unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::UpstreamFault { .. })
    ));
}

#[tokio::test]
async fn empty_frame_is_no_data() {
    let tq = dynamic_with_frame(MarketplaceFrame {
        columns: vec!["Date".into(), "Value".into()],
        rows: vec![],
    })
    .await;
    let report = tq
        .get("TEST/FRAME", &["quandl"], &early_2018())
        .await
        .unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NoDataAvailable { .. })
    ));
}
