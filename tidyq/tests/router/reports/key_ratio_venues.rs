use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tidyq::{GetOutput, LayoutDetector, ReportLayout, Tidyq, TidyqError};
use tidyq_mock::fixtures::key_ratios::{PLACEHOLDER, Variant, render};
use tidyq_mock::fixtures::series::by_request;

use crate::helpers::mock_connector::ScriptedConnectorBuilder;
use crate::helpers::{AAPL, ScriptedConnector, as_of, fixture_builder};

fn apple_report() -> String {
    render("Apple Inc", 2016, 9, Variant::Full)
}

/// Connector serving only fixture prices, so valuation can be computed.
fn prices_only() -> Arc<ScriptedConnector> {
    ScriptedConnector::builder()
        .name("prices")
        .with_series_fn(|req| {
            by_request(req).ok_or_else(|| TidyqError::not_found(req.symbol.clone()))
        })
        .build()
}

fn tq_with(reports: ScriptedConnectorBuilder, attempts: u32) -> (Tidyq, Arc<AtomicUsize>) {
    let calls = reports.call_counter();
    let tq = Tidyq::builder()
        .with_connector(reports.name("reports").build())
        .with_connector(prices_only())
        .key_ratio_attempts(attempts)
        .build()
        .unwrap();
    (tq, calls)
}

fn opts() -> tidyq::GetOptions {
    tidyq::GetOptions::new().as_of(as_of())
}

#[tokio::test]
async fn transport_errors_are_retried_before_the_next_venue() {
    let reports = ScriptedConnector::builder().with_report_fn(|venue, _| match venue {
        "XNAS" => Err(TidyqError::upstream("reports", "connection reset")),
        _ => Ok(apple_report()),
    });
    let (tq, calls) = tq_with(reports, 2);

    let report = tq.get(AAPL, &["key.ratios"], &opts()).await.unwrap();
    assert!(matches!(report.output, GetOutput::Table(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn every_venue_failing_collects_each_error() {
    let reports = ScriptedConnector::builder()
        .with_report_fn(|venue, _| Err(TidyqError::upstream("reports", format!("{venue} down"))));
    let (tq, calls) = tq_with(reports, 3);

    let report = tq.get(AAPL, &["key.ratios"], &opts()).await.unwrap();
    match &report.output {
        GetOutput::Failed(TidyqError::AllProvidersFailed(errors)) => {
            assert_eq!(errors.len(), 3);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 9);
}

#[tokio::test]
async fn placeholders_move_on_without_retrying() {
    let reports = ScriptedConnector::builder().with_report_fn(|_, _| Ok(PLACEHOLDER.to_string()));
    let (tq, calls) = tq_with(reports, 3);

    let report = tq.get(AAPL, &["key.ratios"], &opts()).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::ReportUnavailable { .. })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn one_failing_venue_among_placeholders_is_still_unavailable() {
    let reports = ScriptedConnector::builder().with_report_fn(|venue, _| match venue {
        "XNYS" => Err(TidyqError::upstream("reports", "timeout")),
        _ => Ok(String::new()),
    });
    let (tq, _) = tq_with(reports, 1);

    let report = tq.get(AAPL, &["key.ratios"], &opts()).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::ReportUnavailable { .. })
    ));
}

#[tokio::test]
async fn custom_venue_list_is_honoured() {
    let tq = fixture_builder().key_ratio_venues(["XLON"]).build().unwrap();
    let report = tq.get(AAPL, &["key.ratios"], &opts()).await.unwrap();
    match &report.output {
        GetOutput::Failed(TidyqError::ReportUnavailable { venues, .. }) => {
            assert_eq!(venues, &["XLON"]);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

struct RejectAll;

impl LayoutDetector for RejectAll {
    fn detect(&self, body: &str) -> Result<ReportLayout, TidyqError> {
        Err(TidyqError::upstream("layout", format!("refusing {} bytes", body.len())))
    }
}

#[tokio::test]
async fn replacement_layout_detector_is_consulted() {
    let tq = fixture_builder()
        .layout_detector(Arc::new(RejectAll))
        .build()
        .unwrap();
    let report = tq.get(AAPL, &["key.ratios"], &opts()).await.unwrap();
    match &report.output {
        GetOutput::Failed(TidyqError::UpstreamFault { connector, .. }) => {
            assert_eq!(connector, "layout");
        }
        other => panic!("unexpected: {other:?}"),
    }
}
