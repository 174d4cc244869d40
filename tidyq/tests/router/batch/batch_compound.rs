use tidyq::{Category, DiagnosticKind, GetOutput, TidyqError};

use crate::helpers::{AAPL, BAD, GE, d, fixture_tq, window};

fn q1_2016() -> tidyq::GetOptions {
    window(d(2016, 1, 1), d(2016, 3, 31))
}

#[tokio::test]
async fn compound_request_keeps_one_column_per_category() {
    let tq = fixture_tq();
    let report = tq
        .get(AAPL, &["stock.prices", "dividends"], &q1_2016())
        .await
        .unwrap();

    let GetOutput::Batch(batch) = &report.output else {
        panic!("expected nested output, got {:?}", report.output);
    };
    assert_eq!(batch.len(), 1);
    assert_eq!(batch.categories, [Category::StockPrices, Category::Dividends]);
    let divs = batch
        .get(AAPL, Category::Dividends)
        .and_then(|r| r.table())
        .expect("dividends table");
    assert_eq!(divs.len(), 1);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn non_combinable_category_aborts() {
    let tq = fixture_tq();
    let err = tq
        .get(AAPL, &["stock.prices", "key.stats"], &q1_2016())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TidyqError::InvalidCompoundCategory {
            raw: "key.stats".to_string()
        }
    );
}

#[tokio::test]
async fn later_pass_drops_symbols_that_fail_only_there() {
    let tq = fixture_tq();
    let report = tq
        .get([AAPL, GE], &["stock.prices", "dividends"], &q1_2016())
        .await
        .unwrap();
    let batch = report.output.as_batch().expect("nested output");
    assert_eq!(batch.symbols().collect::<Vec<_>>(), vec![AAPL]);

    assert_eq!(report.warnings.len(), 1);
    let w = &report.warnings[0];
    assert_eq!(w.symbol.as_deref(), Some(GE));
    assert_eq!(w.category, Some(Category::Dividends));
    assert!(matches!(
        w.kind,
        DiagnosticKind::Dropped(TidyqError::NoDataAvailable { .. })
    ));
}

#[tokio::test]
async fn dropped_symbols_are_not_retried_by_later_passes() {
    let tq = fixture_tq();
    let report = tq
        .get([AAPL, BAD], &["stock.prices", "dividends"], &q1_2016())
        .await
        .unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].category, Some(Category::StockPrices));
    assert_eq!(report.output.as_batch().map(|b| b.len()), Some(1));
}
