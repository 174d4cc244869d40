use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tidyq workspace.
///
/// Variants fall into three groups:
/// - argument-contract violations (`InvalidCategory`, `InvalidCompoundCategory`,
///   `InvalidSymbol`, `InvalidArg`) which abort the whole call;
/// - data unavailability (`WindowOutOfRange`, `ReportUnavailable`,
///   `NoDataAvailable`, `NotFound`);
/// - upstream faults (`Data`, `UpstreamFault`, `RateLimited`, `ProviderTimeout`,
///   `Unsupported`, `AllProvidersFailed`).
///
/// The last two groups never escape an adapter: they are carried inside a
/// failed retrieval instead.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TidyqError {
    /// The category string is not one of the known categories.
    #[error("invalid category '{raw}'; use get_options() for the valid set")]
    InvalidCategory {
        /// The category string as supplied by the caller.
        raw: String,
    },

    /// A compound request named a category outside the plain-symbol subset.
    #[error("category '{raw}' cannot be combined with other categories in one request")]
    InvalidCompoundCategory {
        /// The offending category string as supplied by the caller.
        raw: String,
    },

    /// The symbol is empty or otherwise unusable.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested window lies entirely before the provider's lookback ceiling.
    #[error(
        "requested window ends {to}, but {source_name} only serves data since {earliest} ({ceiling_days} day limit)"
    )]
    WindowOutOfRange {
        /// Upstream source enforcing the limit.
        source_name: String,
        /// Requested window end (ISO date).
        to: String,
        /// Earliest date the source still serves (ISO date).
        earliest: String,
        /// Lookback ceiling in days.
        ceiling_days: u32,
    },

    /// Every candidate venue answered with a not-found placeholder.
    #[error("no report available for {symbol} on any of {venues:?}")]
    ReportUnavailable {
        /// Requested symbol.
        symbol: String,
        /// Venues that were tried, in order.
        venues: Vec<String>,
    },

    /// The provider answered but carried no usable data.
    #[error("no data available: {what}")]
    NoDataAvailable {
        /// Description of what was empty, e.g. "dividends for XYZ".
        what: String,
    },

    /// A resource or symbol could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "prices for XYZ".
        what: String,
    },

    /// Issues with the returned or expected data (ragged rows, schema drift).
    #[error("data issue: {0}")]
    Data(String),

    /// Network, parse or format failure from an upstream source.
    #[error("{connector} failed: {msg}")]
    UpstreamFault {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The upstream rejected the call because of rate limiting.
    #[error("{connector} rate limited the request")]
    RateLimited {
        /// Connector name that rate limited.
        connector: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "time-series", "quote-fields").
        capability: String,
    },

    /// No registered connector offers the capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label describing what was requested.
        capability: String,
    },

    /// All eligible providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<TidyqError>),
}

impl TidyqError {
    /// Helper: build an `InvalidCategory` error from the raw string.
    pub fn invalid_category(raw: impl Into<String>) -> Self {
        Self::InvalidCategory { raw: raw.into() }
    }

    /// Helper: build an `UpstreamFault` error with the connector name and message.
    pub fn upstream(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::UpstreamFault {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `NoDataAvailable` error.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoDataAvailable { what: what.into() }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Returns true for caller errors that must abort the whole call rather
    /// than be isolated as a failed retrieval.
    #[must_use]
    pub const fn is_argument_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCategory { .. }
                | Self::InvalidCompoundCategory { .. }
                | Self::InvalidSymbol(_)
                | Self::InvalidArg(_)
        )
    }

    /// Returns true when the upstream simply has nothing for the request.
    #[must_use]
    pub fn is_data_unavailable(&self) -> bool {
        match self {
            Self::WindowOutOfRange { .. }
            | Self::ReportUnavailable { .. }
            | Self::NoDataAvailable { .. }
            | Self::NotFound { .. } => true,
            Self::AllProvidersFailed(inner) => {
                !inner.is_empty() && inner.iter().all(Self::is_data_unavailable)
            }
            _ => false,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
