#![allow(dead_code)]
#![allow(clippy::type_complexity)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tidyq::{TidyqConnector, TidyqError};
use tidyq_core::connector::{QuoteFieldsProvider, ReportProvider, TimeSeriesProvider};
use tidyq_core::{RawSeries, SeriesRequest, SeriesSource};
use tokio::time::{Duration, sleep};

const ALL_SOURCES: &[SeriesSource] =
    &[SeriesSource::Yahoo, SeriesSource::Fred, SeriesSource::Oanda];

/// In-memory connector whose answers are closures set per test.
///
/// A capability is advertised only when its closure is set. Every call bumps
/// `calls`, which tests read through [`ScriptedConnector::call_counter`].
pub struct ScriptedConnector {
    pub name: &'static str,
    pub sources: &'static [SeriesSource],
    pub delay_ms: u64,
    pub series_fn: Option<Arc<dyn Fn(&SeriesRequest) -> Result<RawSeries, TidyqError> + Send + Sync>>,
    pub report_fn: Option<Arc<dyn Fn(&str, &str) -> Result<String, TidyqError> + Send + Sync>>,
    pub quote_fields_fn: Option<Arc<dyn Fn(&str) -> Result<String, TidyqError> + Send + Sync>>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedConnector {
    pub fn builder() -> ScriptedConnectorBuilder {
        ScriptedConnectorBuilder::new()
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl TidyqConnector for ScriptedConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_time_series_provider(&self) -> Option<&dyn TimeSeriesProvider> {
        self.series_fn
            .as_ref()
            .map(|_| self as &dyn TimeSeriesProvider)
    }

    fn as_report_provider(&self) -> Option<&dyn ReportProvider> {
        self.report_fn.as_ref().map(|_| self as &dyn ReportProvider)
    }

    fn as_quote_fields_provider(&self) -> Option<&dyn QuoteFieldsProvider> {
        self.quote_fields_fn
            .as_ref()
            .map(|_| self as &dyn QuoteFieldsProvider)
    }
}

#[async_trait]
impl TimeSeriesProvider for ScriptedConnector {
    async fn series(&self, req: &SeriesRequest) -> Result<RawSeries, TidyqError> {
        self.enter().await;
        match &self.series_fn {
            Some(f) => f(req),
            None => Err(TidyqError::unsupported("time-series")),
        }
    }

    fn supports_source(&self, source: SeriesSource) -> bool {
        self.sources.contains(&source)
    }
}

#[async_trait]
impl ReportProvider for ScriptedConnector {
    async fn report(&self, venue: &str, symbol: &str) -> Result<String, TidyqError> {
        self.enter().await;
        match &self.report_fn {
            Some(f) => f(venue, symbol),
            None => Err(TidyqError::unsupported("report")),
        }
    }
}

#[async_trait]
impl QuoteFieldsProvider for ScriptedConnector {
    async fn quote_fields(&self, symbol: &str, _tags: &[&str]) -> Result<String, TidyqError> {
        self.enter().await;
        match &self.quote_fields_fn {
            Some(f) => f(symbol),
            None => Err(TidyqError::unsupported("quote-fields")),
        }
    }
}

/* ---------- Tiny builder used by tests ---------- */

pub struct ScriptedConnectorBuilder {
    inner: ScriptedConnector,
}

impl ScriptedConnectorBuilder {
    pub fn new() -> Self {
        Self {
            inner: ScriptedConnector {
                name: "scripted",
                sources: ALL_SOURCES,
                delay_ms: 0,
                series_fn: None,
                report_fn: None,
                quote_fields_fn: None,
                calls: Arc::new(AtomicUsize::new(0)),
            },
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.inner.name = name;
        self
    }

    pub fn sources(mut self, sources: &'static [SeriesSource]) -> Self {
        self.inner.sources = sources;
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.inner.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_series_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&SeriesRequest) -> Result<RawSeries, TidyqError> + Send + Sync + 'static,
    {
        self.inner.series_fn = Some(Arc::new(f));
        self
    }

    pub fn returns_series_ok(self, series: RawSeries) -> Self {
        self.with_series_fn(move |_| Ok(series.clone()))
    }

    pub fn fails_series(self, err: TidyqError) -> Self {
        self.with_series_fn(move |_| Err(err.clone()))
    }

    pub fn with_report_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, TidyqError> + Send + Sync + 'static,
    {
        self.inner.report_fn = Some(Arc::new(f));
        self
    }

    pub fn with_quote_fields_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<String, TidyqError> + Send + Sync + 'static,
    {
        self.inner.quote_fields_fn = Some(Arc::new(f));
        self
    }

    /// Shared call counter of the connector being built.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.inner.calls)
    }

    pub fn build(self) -> Arc<ScriptedConnector> {
        Arc::new(self.inner)
    }
}

impl Default for ScriptedConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
