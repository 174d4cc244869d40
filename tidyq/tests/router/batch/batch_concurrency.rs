use crate::helpers::{AAPL, BAD, GE, MSFT, fixture_builder, jan_2016};

#[tokio::test]
async fn concurrent_passes_match_sequential_output() {
    let symbols = [AAPL, BAD, MSFT, "GOOG", GE, "IBM"];
    let sequential = fixture_builder().build().unwrap();
    let concurrent = fixture_builder().batch_concurrency(4).build().unwrap();

    let a = sequential
        .get(symbols, &["stock.prices"], &jan_2016())
        .await
        .unwrap();
    let b = concurrent
        .get(symbols, &["stock.prices"], &jan_2016())
        .await
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.warnings.len(), 1);
    assert_eq!(a.output.as_table().map(|t| t.len()), Some(25));
}
