use async_trait::async_trait;

use crate::TidyqError;
use crate::types::{
    MarketplaceFrame, MarketplacePage, MarketplaceQuery, RawFinancials, RawSeries, SeriesRequest,
    SeriesSource,
};

/// Focused role trait for connectors that serve dated series
/// (prices, dividends, splits, economic, FX, metals).
#[async_trait]
pub trait TimeSeriesProvider: Send + Sync {
    /// Fetch a raw series for the request window.
    async fn series(&self, req: &SeriesRequest) -> Result<RawSeries, TidyqError>;

    /// REQUIRED: whether this connector speaks to the given source family.
    fn supports_source(&self, source: SeriesSource) -> bool;
}

/// Focused role trait for connectors that provide financial statements.
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// Fetch income statement, balance sheet and cash flow, annual and quarterly.
    async fn financials(&self, symbol: &str) -> Result<RawFinancials, TidyqError>;
}

/// Focused role trait for connectors that download the key-ratio report.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    /// Fetch the raw report body for `symbol` listed on `venue`.
    ///
    /// A not-found placeholder (empty body or an apology page) is returned as
    /// `Ok`; only transport failures are errors.
    async fn report(&self, venue: &str, symbol: &str) -> Result<String, TidyqError>;
}

/// Focused role trait for connectors that provide real-time quote statistics.
#[async_trait]
pub trait QuoteFieldsProvider: Send + Sync {
    /// Fetch one wide CSV row holding the requested tags, in order.
    async fn quote_fields(&self, symbol: &str, tags: &[&str]) -> Result<String, TidyqError>;
}

/// Focused role trait for connectors that serve marketplace time-series datasets.
#[async_trait]
pub trait MarketplaceDatasetProvider: Send + Sync {
    /// Fetch one dataset.
    async fn dataset(&self, query: &MarketplaceQuery) -> Result<MarketplaceFrame, TidyqError>;
}

/// Focused role trait for connectors that serve marketplace datatables.
#[async_trait]
pub trait MarketplaceDatatableProvider: Send + Sync {
    /// Fetch one page of a datatable, continuing from `cursor` when given.
    async fn datatable(
        &self,
        query: &MarketplaceQuery,
        cursor: Option<&str>,
    ) -> Result<MarketplacePage, TidyqError>;
}

/// Primary connector interface.
///
/// A connector advertises each capability by returning a trait object from the
/// matching `as_*_provider` accessor. The orchestrator tries connectors in
/// registration order and falls back to the next on failure.
pub trait TidyqConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "tidyq-http", "tidyq-mock").
    fn name(&self) -> &'static str;

    /// Advertise time-series capability.
    fn as_time_series_provider(&self) -> Option<&dyn TimeSeriesProvider> {
        None
    }

    /// Advertise financial statement capability.
    fn as_fundamentals_provider(&self) -> Option<&dyn FundamentalsProvider> {
        None
    }

    /// Advertise key-ratio report capability.
    fn as_report_provider(&self) -> Option<&dyn ReportProvider> {
        None
    }

    /// Advertise quote statistics capability.
    fn as_quote_fields_provider(&self) -> Option<&dyn QuoteFieldsProvider> {
        None
    }

    /// Advertise marketplace dataset capability.
    fn as_marketplace_dataset_provider(&self) -> Option<&dyn MarketplaceDatasetProvider> {
        None
    }

    /// Advertise marketplace datatable capability.
    fn as_marketplace_datatable_provider(&self) -> Option<&dyn MarketplaceDatatableProvider> {
        None
    }
}
