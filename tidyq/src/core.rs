#[cfg(feature = "tracing")]
use std::convert::TryFrom;
use std::sync::Arc;

use tidyq_core::{
    Capability, CredentialStore, EnvCredentials, TidyqConfig, TidyqConnector, TidyqError,
};

use crate::normalize::ratio_report::{LayoutDetector, LineCountLayout};

/// Orchestrator that resolves categories, routes requests across registered
/// providers and normalizes their responses.
pub struct Tidyq {
    pub(crate) connectors: Vec<Arc<dyn TidyqConnector>>,
    pub(crate) cfg: TidyqConfig,
    pub(crate) credentials: Arc<dyn CredentialStore>,
    pub(crate) layout: Arc<dyn LayoutDetector>,
}

/// Builder for constructing a `Tidyq` orchestrator with custom configuration.
pub struct TidyqBuilder {
    connectors: Vec<Arc<dyn TidyqConnector>>,
    cfg: TidyqConfig,
    credentials: Arc<dyn CredentialStore>,
    layout: Arc<dyn LayoutDetector>,
}

impl Default for TidyqBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TidyqBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no connectors, environment-backed credentials and the
    /// line-count report layout detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: TidyqConfig::default(),
            credentials: Arc::new(EnvCredentials),
            layout: Arc::new(LineCountLayout),
        }
    }

    /// Register a provider connector.
    ///
    /// Registration order is the fallback order: for every capability the
    /// first capable connector is tried first.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TidyqConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TidyqConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the marketplace credential store.
    #[must_use]
    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = store;
        self
    }

    /// Replace the key-ratio report layout detector.
    #[must_use]
    pub fn layout_detector(mut self, detector: Arc<dyn LayoutDetector>) -> Self {
        self.layout = detector;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Remove failed rows from batches (`true`) or keep them inline (`false`).
    #[must_use]
    pub const fn drop_failures(mut self, yes: bool) -> Self {
        self.cfg.drop_failures = yes;
        self
    }

    /// Flatten single-category batches of several symbols into one table.
    #[must_use]
    pub const fn flatten_single_category(mut self, yes: bool) -> Self {
        self.cfg.flatten_single_category = yes;
        self
    }

    /// Candidate venues for the key-ratio report, tried in order.
    #[must_use]
    pub fn key_ratio_venues<I, S>(mut self, venues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.key_ratio_venues = venues.into_iter().map(Into::into).collect();
        self
    }

    /// Attempts per venue on transport errors.
    #[must_use]
    pub const fn key_ratio_attempts(mut self, n: u32) -> Self {
        self.cfg.key_ratio_attempts = n;
        self
    }

    /// Number of symbol/category pairs of one batch pass allowed in flight.
    #[must_use]
    pub const fn batch_concurrency(mut self, n: usize) -> Self {
        self.cfg.batch_concurrency = n;
        self
    }

    /// Cap on datatable pages followed when pagination is requested.
    #[must_use]
    pub const fn datatable_max_pages(mut self, n: u32) -> Self {
        self.cfg.datatable_max_pages = n;
        self
    }

    /// Build the `Tidyq` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered, if no
    /// key-ratio venue is configured, or if attempts, concurrency or the page
    /// cap is zero.
    pub fn build(self) -> Result<Tidyq, TidyqError> {
        if self.connectors.is_empty() {
            return Err(TidyqError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.key_ratio_venues.is_empty() {
            return Err(TidyqError::InvalidArg(
                "key_ratio_venues must name at least one venue".to_string(),
            ));
        }
        if self.cfg.key_ratio_attempts == 0 {
            return Err(TidyqError::InvalidArg(
                "key_ratio_attempts must be at least 1".to_string(),
            ));
        }
        if self.cfg.batch_concurrency == 0 {
            return Err(TidyqError::InvalidArg(
                "batch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.cfg.datatable_max_pages == 0 {
            return Err(TidyqError::InvalidArg(
                "datatable_max_pages must be at least 1".to_string(),
            ));
        }

        Ok(Tidyq {
            connectors: self.connectors,
            cfg: self.cfg,
            credentials: self.credentials,
            layout: self.layout,
        })
    }
}

/// Attribute a bare connector error to the connector that raised it.
pub fn tag_err(connector: &str, e: TidyqError) -> TidyqError {
    match e {
        e @ (TidyqError::NotFound { .. }
        | TidyqError::NoDataAvailable { .. }
        | TidyqError::ProviderTimeout { .. }
        | TidyqError::UpstreamFault { .. }
        | TidyqError::RateLimited { .. }
        | TidyqError::AllProvidersFailed(_)) => e,
        other => TidyqError::upstream(connector, other.to_string()),
    }
}

impl Tidyq {
    /// Start building a new `Tidyq` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let tq = tidyq::Tidyq::builder()
    ///     .with_connector(Arc::new(tidyq_http::HttpConnector::new_default()?))
    ///     .drop_failures(true)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TidyqBuilder {
        TidyqBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TidyqConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidyq::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, TidyqError>
    where
        Fut: core::future::Future<Output = Result<T, TidyqError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(TidyqError::provider_timeout(
                connector_name,
                capability.as_str(),
            ))
        })
    }

    /// Single-item fetch with priority fallback.
    ///
    /// - Tries every connector whose `call` yields a future, in registration order
    /// - Applies the per-provider timeout to each attempt
    /// - Returns the first success; otherwise collapses the collected errors
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidyq::core::fetch_single",
            skip(self, call),
            fields(subject = %subject, capability = %capability, not_found = %not_found_label),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        subject: &str,
        capability: Capability,
        not_found_label: &'static str,
        call: F,
    ) -> Result<T, TidyqError>
    where
        T: Send,
        F: Fn(Arc<dyn TidyqConnector>) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, TidyqError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<TidyqError> = Vec::new();

        for c in &self.connectors {
            if let Some(fut) = call(Arc::clone(c)) {
                attempted_any = true;
                match Self::provider_call_with_timeout(
                    c.name(),
                    capability,
                    self.cfg.provider_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(e @ (TidyqError::NotFound { .. } | TidyqError::ProviderTimeout { .. })) => {
                        errors.push(e);
                    }
                    Err(e) => errors.push(tag_err(c.name(), e)),
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{not_found_label} for {subject}")),
        ))
    }
}
