mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use tidyq::{EnvCredentials, GetOptions, GetOutput, Tidyq};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // The marketplace key is read from the environment; without it the call
    // still proceeds under anonymous limits and a notice is reported.
    let tq = Tidyq::builder()
        .with_connector(common::get_connector())
        .credentials(Arc::new(EnvCredentials))
        .datatable_max_pages(3)
        .build()?;

    let opts = GetOptions::new()
        .from(NaiveDate::from_ymd_opt(2018, 1, 2).ok_or("bad date")?)
        .to(NaiveDate::from_ymd_opt(2018, 1, 31).ok_or("bad date")?)
        .param("order", "desc");
    let report = tq.get("WIKI/AAPL", &["quandl"], &opts).await?;
    if let GetOutput::Table(t) = &report.output {
        common::print_head(t, 5);
    }
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }

    let opts = GetOptions::new()
        .param("ticker", "AAPL,MSFT,GOOG")
        .param("paginate", "true");
    let report = tq.get("ZACKS/FC", &["quandl.datatable"], &opts).await?;
    match &report.output {
        GetOutput::Table(t) => common::print_head(t, 10),
        GetOutput::Failed(e) => eprintln!("datatable failed: {e}"),
        GetOutput::Batch(_) => {}
    }
    Ok(())
}
