mod common;

use chrono::NaiveDate;
use tidyq::{GetOptions, GetOutput, Tidyq};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Build the orchestrator over one connector (mock in CI).
    let tq = Tidyq::builder()
        .with_connector(common::get_connector())
        .build()?;

    // 2. One symbol, one category, an explicit window.
    let opts = GetOptions::new()
        .from(NaiveDate::from_ymd_opt(2016, 1, 1).ok_or("bad date")?)
        .to(NaiveDate::from_ymd_opt(2016, 1, 31).ok_or("bad date")?);
    let report = tq.get("AAPL", &["Stock Prices"], &opts).await?;

    // 3. A failure is a value, not an error: print whichever came back.
    match &report.output {
        GetOutput::Table(t) => common::print_head(t, 10),
        GetOutput::Failed(e) => eprintln!("retrieval failed: {e}"),
        GetOutput::Batch(_) => unreachable!("single symbol, single category"),
    }
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }

    // 4. Every category string the resolver accepts.
    println!("categories: {}", tidyq::get_options().join(", "));
    Ok(())
}
