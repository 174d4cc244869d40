use tidyq::DiagnosticKind;

use crate::helpers::{AAPL, BAD, count_kind, fixture_tq, jan_2016, table, texts};

#[tokio::test]
async fn failed_symbols_are_removed_with_one_notice_each() {
    let tq = fixture_tq();
    let report = tq
        .get([AAPL, BAD], &["stock.prices"], &jan_2016())
        .await
        .unwrap();
    let t = table(&report);

    assert_eq!(t.columns()[0], "symbol");
    assert_eq!(t.len(), 5);
    assert!(texts(t, "symbol").iter().all(|s| *s == AAPL));

    assert_eq!(report.warnings.len(), 1);
    let w = &report.warnings[0];
    assert!(matches!(w.kind, DiagnosticKind::Dropped(_)));
    assert_eq!(w.symbol.as_deref(), Some(BAD));
    assert!(
        w.message
            .starts_with("x = 'XYZBADTICKER', get = 'stock.prices': "),
        "{}",
        w.message
    );
    assert!(w.message.ends_with("Removing XYZBADTICKER."), "{}", w.message);
}

#[tokio::test]
async fn every_symbol_failing_leaves_an_empty_typed_table() {
    let tq = fixture_tq();
    let report = tq
        .get([BAD, "ALSOBAD"], &["dividends"], &jan_2016())
        .await
        .unwrap();
    let t = table(&report);
    assert!(t.is_empty());
    assert_eq!(t.columns(), &["symbol", "date", "dividends"]);
    assert_eq!(
        count_kind(&report.warnings, |k| matches!(k, DiagnosticKind::Dropped(_))),
        2
    );
}
