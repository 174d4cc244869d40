//! tidyq retrieves financial time series and fundamentals into tidy tables.
//!
//! Overview
//! - Resolves a free-form category name ("Stock Prices", "key.ratios") to a
//!   closed [`Category`] and looks up its retrieval strategy.
//! - Routes the provider call across registered connectors in registration
//!   order, with a per-provider timeout and fallback.
//! - Normalizes time series, financial statements, the scraped key-ratio
//!   report, quote statistics and marketplace datasets into [`TidyTable`]s.
//! - Maps the single-symbol path over many symbols and categories, isolating
//!   per-symbol failures and reporting each one as a [`Diagnostic`].
//!
//! Key behaviors
//! - Only argument violations (unknown category, empty symbol, reversed
//!   window, non-combinable categories) abort a call. Everything upstream
//!   becomes a failed retrieval plus exactly one diagnostic.
//! - Batches are sequential by default; `batch_concurrency` allows several
//!   pairs of one pass in flight while keeping output order.
//! - The FX/metals source serves only the last 180 days: windows ending
//!   earlier fail without a provider call; older starts are clamped with a
//!   `PartialWindow` notice.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tidyq::{GetOptions, Tidyq};
//!
//! let tq = Tidyq::builder()
//!     .with_connector(Arc::new(tidyq_http::HttpConnector::new_default()?))
//!     .build()?;
//!
//! let opts = GetOptions::new()
//!     .from(chrono::NaiveDate::from_ymd_opt(2016, 1, 1).unwrap())
//!     .to(chrono::NaiveDate::from_ymd_opt(2016, 1, 10).unwrap());
//! let report = tq.get(["AAPL", "MSFT"], &["stock.prices"], &opts).await?;
//! for w in &report.warnings {
//!     eprintln!("{w}");
//! }
//! ```
//!
//! See `tidyq/demos/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

mod adapters;
mod batch;
mod context;
pub(crate) mod core;
mod dispatch;
mod normalize;
/// Category name resolution and discovery.
pub mod resolve;
mod router;
/// Static category → retrieval strategy table.
pub mod strategy;

pub use core::{Tidyq, TidyqBuilder};
pub use dispatch::Dispatched;
pub use normalize::ratio_report::{
    FULL_LAYOUT, GroupBlock, LayoutDetector, LineCountLayout, PATCHED_LAYOUT, ReportLayout,
};
pub use resolve::{compound_get_options, get_options};
pub use strategy::{AdapterKind, StrategyDescriptor};

// Re-export core types for convenience
pub use tidyq_core::{
    BatchResult, BatchRow, Capability, Category, CredentialStore, DEFAULT_KEY_RATIO_VENUES,
    Diagnostic, DiagnosticKind, EnvCredentials, GetOptions, GetOutput, GetReport, Retrieval,
    StaticCredentials, SymbolInput, TidyTable, TidyqConfig, TidyqConnector, TidyqError, Value,
};
