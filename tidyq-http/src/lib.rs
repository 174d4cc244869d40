//! tidyq-http
//!
//! Public connector that implements `TidyqConnector` over plain HTTP. Serves
//! price/dividend/split history and quote statistics from Yahoo, economic
//! series from FRED, currency and metal rates from Oanda, the key-ratio report
//! export from Morningstar and datasets/datatables from the Quandl marketplace.
//!
//! Financial statements are not offered; register another connector for them.
#![warn(missing_docs)]

mod client;
/// Upstream base URLs.
pub mod endpoints;
mod parse;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use tidyq_core::connector::{
    MarketplaceDatasetProvider, MarketplaceDatatableProvider, QuoteFieldsProvider, ReportProvider,
    TidyqConnector, TimeSeriesProvider,
};
use tidyq_core::{
    MarketplaceFrame, MarketplacePage, MarketplaceQuery, RawSeries, SeriesKind, SeriesRequest,
    SeriesSource, TidyqError,
};
use url::Url;

use client::HttpClient;
pub use endpoints::Endpoints;

/// Connector name used in errors and logs.
pub const NAME: &str = "tidyq-http";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Public connector type. Production users will construct with `HttpConnector::new_default()`.
pub struct HttpConnector {
    http: HttpClient,
    endpoints: Endpoints,
}

fn unix_midnight(d: NaiveDate) -> i64 {
    d.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp())
}

impl HttpConnector {
    /// Build against the public hosts with a default HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, TidyqError> {
        Self::try_new(Endpoints::public()?)
    }

    /// Build against `endpoints` with a default HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new(endpoints: Endpoints) -> Result<Self, TidyqError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TidyqError::upstream(NAME, format!("building HTTP client: {e}")))?;
        Ok(Self::with_client(http, endpoints))
    }

    /// Build from a provided `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self {
            http: HttpClient::new(http),
            endpoints,
        }
    }

    /// Active endpoints.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn with_segment(base: &Url, segment: &str) -> Result<Url, TidyqError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| TidyqError::InvalidArg(format!("endpoint {base} cannot take a path")))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn yahoo_history_url(&self, req: &SeriesRequest) -> Result<Url, TidyqError> {
        let events = match req.kind {
            SeriesKind::Dividends => "div",
            SeriesKind::Splits => "split",
            _ => "history",
        };
        let end = req.to.checked_add_days(Days::new(1)).unwrap_or(req.to);
        let mut url = Self::with_segment(&self.endpoints.yahoo_history, &req.symbol)?;
        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(req.from).to_string())
            .append_pair("period2", &unix_midnight(end).to_string())
            .append_pair("interval", "1d")
            .append_pair("events", events)
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }

    fn fred_url(&self, code: &str) -> Url {
        let mut url = self.endpoints.fred.clone();
        url.query_pairs_mut().append_pair("id", code);
        url
    }

    fn oanda_url(&self, req: &SeriesRequest) -> Result<Url, TidyqError> {
        let (base, quote) = req
            .symbol
            .split_once('/')
            .ok_or_else(|| TidyqError::not_found(format!("rate pair {}", req.symbol)))?;
        let mut url = self.endpoints.oanda.clone();
        url.query_pairs_mut()
            .append_pair("base", base)
            .append_pair("quote", quote)
            .append_pair("data_type", "general_currency_pair")
            .append_pair("start_date", &req.from.to_string())
            .append_pair("end_date", &req.to.to_string());
        Ok(url)
    }

    fn quandl_url(
        &self,
        kind: &str,
        query: &MarketplaceQuery,
        suffix: &str,
    ) -> Result<Url, TidyqError> {
        let mut url = self
            .endpoints
            .quandl
            .join(&format!("{kind}/{}{suffix}", query.code))
            .map_err(|e| {
                TidyqError::InvalidArg(format!("invalid marketplace code '{}': {e}", query.code))
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &query.params {
                pairs.append_pair(k, v);
            }
            if let Some(key) = &query.api_key {
                pairs.append_pair("api_key", key);
            }
        }
        Ok(url)
    }
}

impl TidyqConnector for HttpConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn as_time_series_provider(&self) -> Option<&dyn TimeSeriesProvider> {
        Some(self as &dyn TimeSeriesProvider)
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
impl TimeSeriesProvider for HttpConnector {
    async fn series(&self, req: &SeriesRequest) -> Result<RawSeries, TidyqError> {
        let what = format!("{} series for {}", req.source.as_str(), req.symbol);
        match req.source {
            SeriesSource::Yahoo => {
                let body = self.http.get_text(self.yahoo_history_url(req)?, &what).await?;
                parse::yahoo_history(&body, req.kind)
            }
            SeriesSource::Fred => {
                let body = self.http.get_text(self.fred_url(&req.symbol), &what).await?;
                parse::fred_csv(&body)
            }
            SeriesSource::Oanda => {
                let body = self.http.get_text(self.oanda_url(req)?, &what).await?;
                parse::oanda_rates(&body, &req.symbol)
            }
        }
    }

    fn supports_source(&self, _source: SeriesSource) -> bool {
        true
    }
}

#[async_trait]
impl ReportProvider for HttpConnector {
    async fn report(&self, venue: &str, symbol: &str) -> Result<String, TidyqError> {
        let mut url = self.endpoints.morningstar.clone();
        url.query_pairs_mut()
            .append_pair("t", &format!("{venue}:{symbol}"))
            .append_pair("region", "usa")
            .append_pair("culture", "en-US")
            .append_pair("order", "asc");
        self.http
            .get_text(url, &format!("key ratio report for {venue}:{symbol}"))
            .await
    }
}

#[async_trait]
impl QuoteFieldsProvider for HttpConnector {
    async fn quote_fields(&self, symbol: &str, tags: &[&str]) -> Result<String, TidyqError> {
        let mut url = self.endpoints.yahoo_quotes.clone();
        url.query_pairs_mut()
            .append_pair("s", symbol)
            .append_pair("f", &tags.concat());
        self.http
            .get_text(url, &format!("quote statistics for {symbol}"))
            .await
    }
}

#[async_trait]
impl MarketplaceDatasetProvider for HttpConnector {
    async fn dataset(&self, query: &MarketplaceQuery) -> Result<MarketplaceFrame, TidyqError> {
        let url = self.quandl_url("datasets", query, "/data.json")?;
        let body = self
            .http
            .get_text(url, &format!("dataset {}", query.code))
            .await?;
        parse::quandl_dataset(&body)
    }
}

#[async_trait]
impl MarketplaceDatatableProvider for HttpConnector {
    async fn datatable(
        &self,
        query: &MarketplaceQuery,
        cursor: Option<&str>,
    ) -> Result<MarketplacePage, TidyqError> {
        let mut url = self.quandl_url("datatables", query, ".json")?;
        if let Some(c) = cursor {
            url.query_pairs_mut().append_pair("qopts.cursor_id", c);
        }
        let body = self
            .http
            .get_text(url, &format!("datatable {}", query.code))
            .await?;
        parse::quandl_datatable(&body)
    }
}
