use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tidyq_core::connector::{
    MarketplaceDatasetProvider, QuoteFieldsProvider, ReportProvider, TidyqConnector,
    TimeSeriesProvider,
};
use tidyq_core::{
    Capability, MarketplaceFrame, MarketplaceQuery, RawSeries, SeriesRequest, SeriesSource,
    TidyqError,
};

const ALL_SOURCES: &[SeriesSource] =
    &[SeriesSource::Yahoo, SeriesSource::Fred, SeriesSource::Oanda];

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TidyqError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// One provider call as observed by the dynamic mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Capability invoked.
    pub capability: Capability,
    /// Symbol, `venue:symbol` for reports, or marketplace code.
    pub subject: String,
}

#[derive(Default)]
struct InternalState {
    series_rules: HashMap<String, MockBehavior<RawSeries>>,
    report_rules: HashMap<(String, String), MockBehavior<String>>,
    quote_rules: HashMap<String, MockBehavior<String>>,
    dataset_rules: HashMap<String, MockBehavior<MarketplaceFrame>>,
    calls: Vec<MockCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `series` calls for a specific upstream symbol.
    pub async fn set_series_behavior(&self, symbol: &str, behavior: MockBehavior<RawSeries>) {
        let mut guard = self.state.lock().await;
        guard.series_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `report` calls for a venue and symbol.
    pub async fn set_report_behavior(
        &self,
        venue: &str,
        symbol: &str,
        behavior: MockBehavior<String>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .report_rules
            .insert((venue.to_string(), symbol.to_string()), behavior);
    }

    /// Set the behavior for `quote_fields` calls for a specific symbol.
    pub async fn set_quote_fields_behavior(&self, symbol: &str, behavior: MockBehavior<String>) {
        let mut guard = self.state.lock().await;
        guard.quote_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `dataset` calls for a marketplace code.
    pub async fn set_dataset_behavior(&self, code: &str, behavior: MockBehavior<MarketplaceFrame>) {
        let mut guard = self.state.lock().await;
        guard.dataset_rules.insert(code.to_string(), behavior);
    }

    /// Return a copy of the call log, oldest first.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of logged calls for one capability.
    pub async fn call_count(&self, capability: Capability) -> usize {
        let guard = self.state.lock().await;
        guard
            .calls
            .iter()
            .filter(|c| c.capability == capability)
            .count()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.series_rules.clear();
        guard.report_rules.clear();
        guard.quote_rules.clear();
        guard.dataset_rules.clear();
        guard.calls.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    sources: &'static [SeriesSource],
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector serving every series source, and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn TidyqConnector>, DynamicMockController) {
        Self::new_with_sources(name, ALL_SOURCES)
    }

    /// Like [`DynamicMockConnector::new_with_controller`], restricted to `sources`.
    #[must_use]
    pub fn new_with_sources(
        name: &'static str,
        sources: &'static [SeriesSource],
    ) -> (Arc<dyn TidyqConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            sources,
            state,
        });
        (me as Arc<dyn TidyqConnector>, controller)
    }

    /// Log the call and snapshot the matching rule without holding the lock across awaits.
    async fn take_rule<T: Clone>(
        &self,
        capability: Capability,
        subject: String,
        pick: impl FnOnce(&InternalState) -> Option<MockBehavior<T>>,
    ) -> Option<MockBehavior<T>> {
        let mut guard = self.state.lock().await;
        guard.calls.push(MockCall {
            capability,
            subject,
        });
        pick(&*guard)
    }

    async fn run<T>(
        behavior: Option<MockBehavior<T>>,
        capability: Capability,
    ) -> Result<T, TidyqError> {
        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(TidyqError::unsupported(capability.as_str())),
        }
    }
}

impl TidyqConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
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
}

#[async_trait]
impl TimeSeriesProvider for DynamicMockConnector {
    async fn series(&self, req: &SeriesRequest) -> Result<RawSeries, TidyqError> {
        let behavior = self
            .take_rule(Capability::TimeSeries, req.symbol.clone(), |s| {
                s.series_rules.get(&req.symbol).cloned()
            })
            .await;
        Self::run(behavior, Capability::TimeSeries).await
    }

    fn supports_source(&self, source: SeriesSource) -> bool {
        self.sources.contains(&source)
    }
}

#[async_trait]
impl ReportProvider for DynamicMockConnector {
    async fn report(&self, venue: &str, symbol: &str) -> Result<String, TidyqError> {
        let key = (venue.to_string(), symbol.to_string());
        let behavior = self
            .take_rule(Capability::Report, format!("{venue}:{symbol}"), |s| {
                s.report_rules.get(&key).cloned()
            })
            .await;
        Self::run(behavior, Capability::Report).await
    }
}

#[async_trait]
impl QuoteFieldsProvider for DynamicMockConnector {
    async fn quote_fields(&self, symbol: &str, _tags: &[&str]) -> Result<String, TidyqError> {
        let behavior = self
            .take_rule(Capability::QuoteFields, symbol.to_string(), |s| {
                s.quote_rules.get(symbol).cloned()
            })
            .await;
        Self::run(behavior, Capability::QuoteFields).await
    }
}

#[async_trait]
impl MarketplaceDatasetProvider for DynamicMockConnector {
    async fn dataset(&self, query: &MarketplaceQuery) -> Result<MarketplaceFrame, TidyqError> {
        let behavior = self
            .take_rule(Capability::MarketplaceDataset, query.code.clone(), |s| {
                s.dataset_rules.get(&query.code).cloned()
            })
            .await;
        Self::run(behavior, Capability::MarketplaceDataset).await
    }
}
