//! Mock tidyq connector serving deterministic fixture data.
//!
//! Symbols `FAIL` and `TIMEOUT` trigger a forced upstream fault and a short
//! delay respectively; unknown symbols are reported as not found.

use std::time::Duration;

use async_trait::async_trait;
use tidyq_core::connector::{
    FundamentalsProvider, MarketplaceDatasetProvider, MarketplaceDatatableProvider,
    QuoteFieldsProvider, ReportProvider, TidyqConnector, TimeSeriesProvider,
};
use tidyq_core::{
    MarketplaceFrame, MarketplacePage, MarketplaceQuery, RawFinancials, RawSeries, SeriesRequest,
    SeriesSource, TidyqError,
};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior, MockCall};

/// Delay applied to the `TIMEOUT` symbol.
pub const TIMEOUT_DELAY: Duration = Duration::from_millis(200);

/// Mock connector for CI-safe demos. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> TidyqError {
        TidyqError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(
        symbol: &str,
        capability: &'static str,
    ) -> Result<(), TidyqError> {
        match symbol {
            "FAIL" => Err(TidyqError::upstream(
                "tidyq-mock",
                format!("forced failure: {capability}"),
            )),
            "TIMEOUT" => {
                // Long enough for a short orchestrator timeout to fire.
                tokio::time::sleep(TIMEOUT_DELAY).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl TidyqConnector for MockConnector {
    fn name(&self) -> &'static str {
        "tidyq-mock"
    }

    fn as_time_series_provider(&self) -> Option<&dyn TimeSeriesProvider> {
        Some(self as &dyn TimeSeriesProvider)
    }
    fn as_fundamentals_provider(&self) -> Option<&dyn FundamentalsProvider> {
        Some(self as &dyn FundamentalsProvider)
    }
    fn as_report_provider(&self) -> Option<&dyn ReportProvider> {
        Some(self as &dyn ReportProvider)
    }
    fn as_quote_fields_provider(&self) -> Option<&dyn QuoteFieldsProvider> {
        Some(self as &dyn QuoteFieldsProvider)
    }
    fn as_marketplace_dataset_provider(&self) -> Option<&dyn MarketplaceDatasetProvider> {
        Some(self as &dyn MarketplaceDatasetProvider)
    }
    fn as_marketplace_datatable_provider(&self) -> Option<&dyn MarketplaceDatatableProvider> {
        Some(self as &dyn MarketplaceDatatableProvider)
    }
}

#[async_trait]
impl TimeSeriesProvider for MockConnector {
    async fn series(&self, req: &SeriesRequest) -> Result<RawSeries, TidyqError> {
        let s = req.symbol.as_str();
        Self::maybe_fail_or_timeout(s, "series").await?;
        fixtures::series::by_request(req)
            .ok_or_else(|| Self::not_found(&format!("{} series for {s}", req.source.as_str())))
    }

    fn supports_source(&self, _source: SeriesSource) -> bool {
        true
    }
}

#[async_trait]
impl FundamentalsProvider for MockConnector {
    async fn financials(&self, symbol: &str) -> Result<RawFinancials, TidyqError> {
        Self::maybe_fail_or_timeout(symbol, "financials").await?;
        fixtures::financials::by_symbol(symbol)
            .ok_or_else(|| Self::not_found(&format!("financials for {symbol}")))
    }
}

#[async_trait]
impl ReportProvider for MockConnector {
    async fn report(&self, venue: &str, symbol: &str) -> Result<String, TidyqError> {
        Self::maybe_fail_or_timeout(symbol, "report").await?;
        Ok(fixtures::key_ratios::by_venue(venue, symbol)
            .unwrap_or_else(|| fixtures::key_ratios::PLACEHOLDER.to_string()))
    }
}

#[async_trait]
impl QuoteFieldsProvider for MockConnector {
    async fn quote_fields(&self, symbol: &str, tags: &[&str]) -> Result<String, TidyqError> {
        Self::maybe_fail_or_timeout(symbol, "quote fields").await?;
        fixtures::key_stats::by_symbol(symbol, tags)
            .ok_or_else(|| Self::not_found(&format!("quote statistics for {symbol}")))
    }
}

#[async_trait]
impl MarketplaceDatasetProvider for MockConnector {
    async fn dataset(&self, query: &MarketplaceQuery) -> Result<MarketplaceFrame, TidyqError> {
        Self::maybe_fail_or_timeout(&query.code, "dataset").await?;
        fixtures::marketplace::dataset(query)
            .ok_or_else(|| Self::not_found(&format!("dataset {}", query.code)))
    }
}

#[async_trait]
impl MarketplaceDatatableProvider for MockConnector {
    async fn datatable(
        &self,
        query: &MarketplaceQuery,
        cursor: Option<&str>,
    ) -> Result<MarketplacePage, TidyqError> {
        Self::maybe_fail_or_timeout(&query.code, "datatable").await?;
        fixtures::marketplace::datatable(query, cursor)
            .ok_or_else(|| Self::not_found(&format!("datatable {}", query.code)))
    }
}
