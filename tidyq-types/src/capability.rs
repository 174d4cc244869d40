use core::fmt;
use serde::{Deserialize, Serialize};

/// Connector capability labels for routing, errors, and telemetry.
///
/// Each label corresponds to one collaborator trait in `tidyq-core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Date-indexed series (prices, actions, economic, FX, metals).
    TimeSeries,
    /// Financial statements.
    Fundamentals,
    /// Semi-structured key-ratio report download.
    Report,
    /// Tag-driven quote field snapshot.
    QuoteFields,
    /// Marketplace single dataset.
    MarketplaceDataset,
    /// Marketplace datatable page.
    MarketplaceDatatable,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeries => "time-series",
            Self::Fundamentals => "fundamentals",
            Self::Report => "report",
            Self::QuoteFields => "quote-fields",
            Self::MarketplaceDataset => "marketplace-dataset",
            Self::MarketplaceDatatable => "marketplace-datatable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
