use tidyq::{DiagnosticKind, GetOptions};

use crate::helpers::{as_of, fixture_builder, fixture_tq, table, texts};

fn opts() -> GetOptions {
    GetOptions::new().as_of(as_of())
}

fn truncated_pages(report: &tidyq::GetReport) -> Vec<u32> {
    report
        .warnings
        .iter()
        .filter_map(|w| match w.kind {
            DiagnosticKind::Truncated { pages } => Some(pages),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn first_page_only_without_paginate() {
    let tq = fixture_tq();
    let report = tq.get("ZACKS/FC", &["quandl.datatable"], &opts()).await.unwrap();
    let t = table(&report);
    assert_eq!(t.len(), 2);
    assert_eq!(
        t.columns(),
        &["m_ticker", "comp_name", "per_end_date", "per_type", "tot_revnu"]
    );
    assert_eq!(truncated_pages(&report), vec![1]);
}

#[tokio::test]
async fn paginate_follows_every_cursor() {
    let tq = fixture_tq();
    let report = tq
        .get("ZACKS/FC", &["quandl.datatable"], &opts().param("paginate", "true"))
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(t.len(), 7);
    assert_eq!(texts(t, "m_ticker")[6], "TSLA");
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn page_cap_stops_pagination_with_a_notice() {
    let tq = fixture_builder().datatable_max_pages(2).build().unwrap();
    let report = tq
        .get("ZACKS/FC", &["quandl.datatable"], &opts().param("paginate", "1"))
        .await
        .unwrap();
    assert_eq!(table(&report).len(), 4);
    assert_eq!(truncated_pages(&report), vec![2]);
}

#[tokio::test]
async fn filters_are_forwarded() {
    let tq = fixture_tq();
    let report = tq
        .get(
            "ZACKS/FC",
            &["quandl.datatable"],
            &opts().param("ticker", "AAPL,MSFT"),
        )
        .await
        .unwrap();
    let t = table(&report);
    assert_eq!(texts(t, "m_ticker"), vec!["AAPL", "MSFT"]);
    assert!(report.warnings.is_empty());
}
