use core::fmt;
use serde::{Deserialize, Serialize};

/// Kind of financial data a caller can request.
///
/// The set is closed; user-facing strings are resolved to a variant once per
/// request and every later step matches on the variant exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Daily OHLCV price history.
    StockPrices,
    /// Cash dividend history.
    Dividends,
    /// Stock split history.
    Splits,
    /// Income statement, balance sheet and cash flow, annual and quarterly.
    Financials,
    /// Scraped key-ratio report plus derived valuation ratios.
    KeyRatios,
    /// Real-time quote statistics snapshot.
    KeyStats,
    /// Economic series (e.g. FRED codes).
    EconomicData,
    /// Currency pair exchange rates.
    ExchangeRates,
    /// Precious metal prices.
    MetalPrices,
    /// Marketplace time-series dataset.
    Quandl,
    /// Marketplace datatable (joined multi-table lookup).
    QuandlDatatable,
}

impl Category {
    /// Every category in presentation order.
    pub const ALL: [Self; 11] = [
        Self::StockPrices,
        Self::Financials,
        Self::KeyRatios,
        Self::KeyStats,
        Self::Dividends,
        Self::Splits,
        Self::EconomicData,
        Self::ExchangeRates,
        Self::MetalPrices,
        Self::Quandl,
        Self::QuandlDatatable,
    ];

    /// Stable dotted identifier, also used as the batch column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StockPrices => "stock.prices",
            Self::Dividends => "dividends",
            Self::Splits => "splits",
            Self::Financials => "financials",
            Self::KeyRatios => "key.ratios",
            Self::KeyStats => "key.stats",
            Self::EconomicData => "economic.data",
            Self::ExchangeRates => "exchange.rates",
            Self::MetalPrices => "metal.prices",
            Self::Quandl => "quandl",
            Self::QuandlDatatable => "quandl.datatable",
        }
    }

    /// Whether the category addresses plain symbols over a date range and can
    /// therefore be combined with others in one compound request.
    #[must_use]
    pub const fn is_compound_eligible(self) -> bool {
        match self {
            Self::StockPrices
            | Self::Dividends
            | Self::Splits
            | Self::EconomicData
            | Self::ExchangeRates
            | Self::MetalPrices => true,
            Self::Financials
            | Self::KeyRatios
            | Self::KeyStats
            | Self::Quandl
            | Self::QuandlDatatable => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
