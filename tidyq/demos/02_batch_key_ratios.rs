mod common;

use tidyq::{Category, GetOptions, Retrieval, Tidyq};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // Keep failed symbols inline so the nested shape is visible.
    let tq = Tidyq::builder()
        .with_connector(common::get_connector())
        .drop_failures(false)
        .batch_concurrency(2)
        .build()?;

    let symbols = ["AAPL", "GE", "XYZBADTICKER"];
    let report = tq
        .get(symbols, &["key.ratios"], &GetOptions::new())
        .await?;

    if let Some(batch) = report.output.as_batch() {
        for symbol in batch.symbols() {
            match batch.get(symbol, Category::KeyRatios) {
                Some(Retrieval::Success(t)) => println!("{symbol}: {} sections", t.len()),
                Some(Retrieval::Failure(e)) => println!("{symbol}: failed ({e})"),
                None => {}
            }
        }
    } else if let Some(t) = report.output.as_table() {
        common::print_head(t, 10);
    }

    for w in &report.warnings {
        eprintln!("warning: {w}");
    }
    Ok(())
}
