//! Non-fatal diagnostics surfaced alongside retrieval results.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::Category;
use crate::error::TidyqError;

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// A standalone retrieval failed; the result is a failure.
    RetrievalFailed(TidyqError),
    /// A batch row failed and was removed.
    Dropped(TidyqError),
    /// A batch row failed and was kept as an inline failure.
    Retained(TidyqError),
    /// The requested window start predates the provider's lookback ceiling.
    PartialWindow {
        /// Start date actually used (ISO date).
        effective_from: String,
    },
    /// An unsupported option was coerced to the supported mode.
    PolicyOverride {
        /// Option name.
        option: String,
        /// Value the caller asked for.
        requested: String,
        /// Value actually sent upstream.
        applied: String,
    },
    /// No marketplace credential is configured; usage limits apply.
    MissingCredential,
    /// A paginated result was cut short.
    Truncated {
        /// Pages actually fetched.
        pages: u32,
    },
    /// The single-category batch could not be flattened uniformly.
    FlattenSkipped,
}

/// A symbol/category-attributed notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Symbol the notice concerns, if any.
    pub symbol: Option<String>,
    /// Category the notice concerns, if any.
    pub category: Option<Category>,
    /// Structured payload.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic attributed to a symbol and category.
    pub fn new(
        symbol: impl Into<String>,
        category: Category,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            category: Some(category),
            kind,
            message: message.into(),
        }
    }

    /// Build a diagnostic about the request as a whole.
    pub fn general(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            symbol: None,
            category: None,
            kind,
            message: message.into(),
        }
    }

    /// The underlying failure, when the diagnostic reports one.
    #[must_use]
    pub const fn failure(&self) -> Option<&TidyqError> {
        match &self.kind {
            DiagnosticKind::RetrievalFailed(e)
            | DiagnosticKind::Dropped(e)
            | DiagnosticKind::Retained(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
