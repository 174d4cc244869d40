pub mod macros;
pub mod util;

// Provider traits are used via returned trait objects; only the series filter names one.
use tidyq_core::connector::TimeSeriesProvider;
use tidyq_core::{
    Capability, MarketplaceFrame, MarketplacePage, MarketplaceQuery, RawFinancials, RawSeries,
    SeriesRequest, TidyqError,
};

use crate::Tidyq;
use crate::tidyq_router_method;

impl Tidyq {
    /// Fetch a raw series from the first connector that serves its source.
    ///
    /// Connectors whose time-series provider does not speak `req.source` are
    /// skipped without counting as an attempt.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::router",
            skip(self, req),
            fields(symbol = %req.symbol, source = req.source.as_str()),
        )
    )]
    pub(crate) async fn series(&self, req: &SeriesRequest) -> Result<RawSeries, TidyqError> {
        self.fetch_single(&req.symbol, Capability::TimeSeries, "series", move |c| {
            let p: &dyn TimeSeriesProvider = c.as_time_series_provider()?;
            if !p.supports_source(req.source) {
                return None;
            }
            Some(async move {
                match c.as_time_series_provider() {
                    Some(p) => p.series(req).await,
                    None => Err(TidyqError::upstream(
                        c.name(),
                        "missing TimeSeriesProvider during call",
                    )),
                }
            })
        })
        .await
    }

    tidyq_router_method! {
        /// Fetch all financial statements for a symbol.
        method: financials(symbol: &str) -> RawFinancials,
        subject: symbol,
        provider: FundamentalsProvider,
        accessor: as_fundamentals_provider,
        capability: Capability::Fundamentals,
        not_found: "financials",
        call: financials(symbol)
    }

    tidyq_router_method! {
        /// Fetch a raw key-ratio report body from one venue.
        method: report(symbol: &str, venue: &str) -> String,
        subject: symbol,
        provider: ReportProvider,
        accessor: as_report_provider,
        capability: Capability::Report,
        not_found: "key ratio report",
        call: report(venue, symbol)
    }

    tidyq_router_method! {
        /// Fetch one wide CSV row of quote statistics.
        method: quote_fields(symbol: &str, tags: &[&str]) -> String,
        subject: symbol,
        provider: QuoteFieldsProvider,
        accessor: as_quote_fields_provider,
        capability: Capability::QuoteFields,
        not_found: "quote statistics",
        call: quote_fields(symbol, tags)
    }

    tidyq_router_method! {
        /// Fetch a marketplace dataset.
        method: dataset(query: &MarketplaceQuery) -> MarketplaceFrame,
        subject: &query.code,
        provider: MarketplaceDatasetProvider,
        accessor: as_marketplace_dataset_provider,
        capability: Capability::MarketplaceDataset,
        not_found: "dataset",
        call: dataset(query)
    }

    tidyq_router_method! {
        /// Fetch one page of a marketplace datatable.
        method: datatable(query: &MarketplaceQuery, cursor: Option<&str>) -> MarketplacePage,
        subject: &query.code,
        provider: MarketplaceDatatableProvider,
        accessor: as_marketplace_datatable_provider,
        capability: Capability::MarketplaceDatatable,
        not_found: "datatable",
        call: datatable(query, cursor)
    }
}
