#![allow(dead_code)]

use std::sync::Arc;

use tidyq::{TidyTable, TidyqConnector};

/// Mock connector when `TIDYQ_DEMOS_USE_MOCK` is set, the live HTTP connector otherwise.
///
/// # Panics
/// If the HTTP client cannot be constructed.
#[must_use]
pub fn get_connector() -> Arc<dyn TidyqConnector> {
    if std::env::var("TIDYQ_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(tidyq_mock::MockConnector::new())
    } else {
        Arc::new(tidyq_http::HttpConnector::new_default().expect("http client"))
    }
}

/// Initialize an env-filtered subscriber. Suggested: `RUST_LOG=info,tidyq=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

/// Print the first `limit` rows of a table, tab separated.
pub fn print_head(t: &TidyTable, limit: usize) {
    println!("{}", t.columns().join("\t"));
    for row in t.rows().iter().take(limit) {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join("\t"));
    }
    if t.len() > limit {
        println!("... {} more rows", t.len() - limit);
    }
}
