use tidyq::{Category, DiagnosticKind, GetOutput, Retrieval, TidyqError};

use crate::helpers::{AAPL, BAD, d, fixture_tq, jan_2016, table, window};

#[tokio::test]
async fn unknown_category_aborts_the_call() {
    let tq = fixture_tq();
    let err = tq
        .get(AAPL, &["stock.pricez"], &jan_2016())
        .await
        .unwrap_err();
    match err {
        TidyqError::InvalidCategory { raw } => assert_eq!(raw, "stock.pricez"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn legacy_category_spelling_is_accepted() {
    let tq = fixture_tq();
    let report = tq.get(AAPL, &["Stock Prices"], &jan_2016()).await.unwrap();
    assert_eq!(table(&report).len(), 5);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn argument_violations_abort_before_any_retrieval() {
    let tq = fixture_tq();

    let err = tq.get("  ", &["stock.prices"], &jan_2016()).await.unwrap_err();
    assert!(matches!(err, TidyqError::InvalidSymbol(_)));

    let reversed = window(d(2016, 1, 10), d(2016, 1, 1));
    let err = tq.get(AAPL, &["stock.prices"], &reversed).await.unwrap_err();
    assert!(matches!(err, TidyqError::InvalidArg(_)));

    // One bad element poisons the whole batch, even after a valid one.
    let err = tq
        .get(vec![AAPL, ""], &["stock.prices"], &jan_2016())
        .await
        .unwrap_err();
    assert!(err.is_argument_violation());

    let err = tq
        .get(AAPL, &Vec::<String>::new(), &jan_2016())
        .await
        .unwrap_err();
    assert!(matches!(err, TidyqError::InvalidArg(_)));
}

#[tokio::test]
async fn standalone_failure_emits_exactly_one_diagnostic() {
    let tq = fixture_tq();
    let report = tq.get(BAD, &["stock.prices"], &jan_2016()).await.unwrap();

    let GetOutput::Failed(err) = &report.output else {
        panic!("expected failure, got {:?}", report.output);
    };
    assert!(matches!(err, TidyqError::NotFound { .. }));
    assert_eq!(report.warnings.len(), 1);
    let w = &report.warnings[0];
    assert!(matches!(w.kind, DiagnosticKind::RetrievalFailed(_)));
    assert_eq!(w.symbol.as_deref(), Some(BAD));
    assert_eq!(w.category, Some(Category::StockPrices));
    assert!(
        w.message
            .starts_with("x = 'XYZBADTICKER', get = 'stock.prices': "),
        "{}",
        w.message
    );
}

#[tokio::test]
async fn batch_mode_dispatch_leaves_reporting_to_the_mapper() {
    let tq = fixture_tq();

    let ok = tq.dispatch(AAPL, "stock.prices", true, &jan_2016()).await.unwrap();
    assert!(matches!(ok.result, Retrieval::Success(ref t) if t.len() == 5));

    let failed = tq.dispatch(BAD, "stock.prices", true, &jan_2016()).await.unwrap();
    assert!(failed.result.is_failure());
    assert!(failed.warnings.is_empty());

    let standalone = tq.dispatch(BAD, "stock.prices", false, &jan_2016()).await.unwrap();
    assert_eq!(standalone.warnings.len(), 1);
}

#[tokio::test]
async fn no_data_in_window_is_a_failed_retrieval() {
    let tq = fixture_tq();
    // New Year's Day and a weekend: no trading days.
    let opts = window(d(2016, 1, 1), d(2016, 1, 3));
    let report = tq.get(AAPL, &["stock.prices"], &opts).await.unwrap();
    assert!(matches!(
        report.output,
        GetOutput::Failed(TidyqError::NoDataAvailable { .. })
    ));
}
