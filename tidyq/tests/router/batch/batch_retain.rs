use tidyq::{Category, DiagnosticKind, GetOutput, Retrieval, TidyqError};

use crate::helpers::{AAPL, BAD, MSFT, count_kind, fixture_builder, jan_2016};

#[tokio::test]
async fn retained_failures_stay_inline_and_block_flattening() {
    let tq = fixture_builder().drop_failures(false).build().unwrap();
    let report = tq
        .get([AAPL, BAD], &["stock.prices"], &jan_2016())
        .await
        .unwrap();

    let GetOutput::Batch(batch) = &report.output else {
        panic!("expected nested output, got {:?}", report.output);
    };
    assert_eq!(batch.symbols().collect::<Vec<_>>(), vec![AAPL, BAD]);
    assert!(matches!(
        batch.get(BAD, Category::StockPrices),
        Some(Retrieval::Failure(TidyqError::NotFound { .. }))
    ));
    assert_eq!(
        batch
            .get(AAPL, Category::StockPrices)
            .and_then(Retrieval::table)
            .map(|t| t.len()),
        Some(5)
    );

    assert_eq!(report.warnings.len(), 2);
    assert_eq!(
        count_kind(&report.warnings, |k| matches!(k, DiagnosticKind::Retained(_))),
        1
    );
    assert_eq!(
        count_kind(&report.warnings, |k| matches!(k, DiagnosticKind::FlattenSkipped)),
        1
    );
    let retained = &report.warnings[0];
    assert!(!retained.message.contains("Removing"));
}

#[tokio::test]
async fn flattening_can_be_turned_off() {
    let tq = fixture_builder()
        .flatten_single_category(false)
        .build()
        .unwrap();
    let report = tq
        .get([AAPL, MSFT], &["stock.prices"], &jan_2016())
        .await
        .unwrap();
    let batch = report.output.as_batch().expect("nested output");
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.key_columns, ["symbol"]);
    assert_eq!(batch.categories, [Category::StockPrices]);
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn explicit_map_batch_overrides_the_configured_drop_flag() {
    let tq = fixture_builder().drop_failures(false).build().unwrap();
    let report = tq
        .map_batch([AAPL, BAD], &["stock.prices"], true, &jan_2016())
        .await
        .unwrap();
    assert_eq!(report.output.as_table().map(|t| t.len()), Some(5));
    assert_eq!(
        count_kind(&report.warnings, |k| matches!(k, DiagnosticKind::Dropped(_))),
        1
    );
}
