use std::sync::Arc;
use std::sync::atomic::Ordering;

use tidyq::{GetOutput, Tidyq, TidyqError};
use tidyq_core::SeriesSource;
use tidyq_mock::MockConnector;

use crate::helpers::{AAPL, BAD, ScriptedConnector, jan_2016, table};

#[tokio::test]
async fn series_falls_back_when_first_errors() {
    let first = ScriptedConnector::builder()
        .name("err")
        .fails_series(TidyqError::upstream("err", "connection reset"))
        .build();
    let tq = Tidyq::builder()
        .with_connector(first.clone())
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let report = tq.get(AAPL, &["stock.prices"], &jan_2016()).await.unwrap();
    assert_eq!(table(&report).len(), 5);
    assert!(report.warnings.is_empty());
    assert_eq!(first.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn connectors_not_serving_the_source_are_skipped() {
    let fred_only = ScriptedConnector::builder()
        .name("fred-only")
        .sources(&[SeriesSource::Fred])
        .fails_series(TidyqError::upstream("fred-only", "should not be called"))
        .build();
    let tq = Tidyq::builder()
        .with_connector(fred_only.clone())
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let report = tq.get(AAPL, &["stock.prices"], &jan_2016()).await.unwrap();
    assert_eq!(table(&report).len(), 5);
    assert_eq!(fred_only.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_failures_are_collected() {
    let first = ScriptedConnector::builder()
        .name("err")
        .fails_series(TidyqError::upstream("err", "boom"))
        .build();
    let tq = Tidyq::builder()
        .with_connector(first)
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap();

    let report = tq.get(BAD, &["stock.prices"], &jan_2016()).await.unwrap();
    match report.output {
        GetOutput::Failed(TidyqError::AllProvidersFailed(errs)) => {
            assert_eq!(errs.len(), 2);
            assert!(matches!(errs[0], TidyqError::UpstreamFault { .. }));
            assert!(matches!(errs[1], TidyqError::NotFound { .. }));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn missing_capability_is_unsupported() {
    let reports_only = ScriptedConnector::builder()
        .with_report_fn(|_, _| Ok(String::new()))
        .build();
    let tq = Tidyq::builder()
        .with_connector(reports_only)
        .build()
        .unwrap();

    let report = tq.get(AAPL, &["stock.prices"], &jan_2016()).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::Unsupported { .. })
    ));
}
