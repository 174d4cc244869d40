//! Static category → retrieval strategy table.

use tidyq_core::{Category, SeriesKind, SeriesSource};

/// Which adapter serves a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    /// Dated series from a price/economic/rates source.
    TimeSeries {
        /// Series flavour.
        kind: SeriesKind,
        /// Upstream family.
        source: SeriesSource,
    },
    /// Income statement, balance sheet and cash flow.
    Fundamentals,
    /// Scraped key-ratio report plus valuation ratios.
    RatioReport,
    /// Real-time quote statistics row.
    QuoteSnapshot,
    /// Marketplace time-series dataset.
    MarketplaceDataset,
    /// Marketplace datatable.
    MarketplaceDatatable,
}

/// How one category is retrieved and shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyDescriptor {
    /// Category served.
    pub category: Category,
    /// Adapter responsible for the category.
    pub adapter: AdapterKind,
    /// Upstream source label used in messages.
    pub source: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Output columns for fixed-width categories; empty when the schema is
    /// dynamic (marketplace) or nested.
    pub fields: &'static [&'static str],
    /// Default lookback from the reference date, in days.
    pub default_lookback_days: Option<u32>,
    /// Oldest data the source still serves, in days before the reference date.
    pub lookback_ceiling_days: Option<u32>,
}

const TEN_YEARS: u32 = 3653;
const OANDA_CEILING: u32 = 180;

const STOCK_PRICES: StrategyDescriptor = StrategyDescriptor {
    category: Category::StockPrices,
    adapter: AdapterKind::TimeSeries {
        kind: SeriesKind::Prices,
        source: SeriesSource::Yahoo,
    },
    source: "yahoo",
    display_name: "stock prices",
    fields: &["date", "open", "high", "low", "close", "volume", "adjusted"],
    default_lookback_days: Some(TEN_YEARS),
    lookback_ceiling_days: None,
};

const DIVIDENDS: StrategyDescriptor = StrategyDescriptor {
    category: Category::Dividends,
    adapter: AdapterKind::TimeSeries {
        kind: SeriesKind::Dividends,
        source: SeriesSource::Yahoo,
    },
    source: "yahoo",
    display_name: "dividends",
    fields: &["date", "dividends"],
    default_lookback_days: Some(TEN_YEARS),
    lookback_ceiling_days: None,
};

const SPLITS: StrategyDescriptor = StrategyDescriptor {
    category: Category::Splits,
    adapter: AdapterKind::TimeSeries {
        kind: SeriesKind::Splits,
        source: SeriesSource::Yahoo,
    },
    source: "yahoo",
    display_name: "splits",
    fields: &["date", "splits"],
    default_lookback_days: Some(TEN_YEARS),
    lookback_ceiling_days: None,
};

const FINANCIALS: StrategyDescriptor = StrategyDescriptor {
    category: Category::Financials,
    adapter: AdapterKind::Fundamentals,
    source: "fundamentals",
    display_name: "financial statements",
    fields: &["type", "annual", "quarter"],
    default_lookback_days: None,
    lookback_ceiling_days: None,
};

const KEY_RATIOS: StrategyDescriptor = StrategyDescriptor {
    category: Category::KeyRatios,
    adapter: AdapterKind::RatioReport,
    source: "morningstar",
    display_name: "key ratios",
    fields: &["section", "data"],
    default_lookback_days: None,
    lookback_ceiling_days: None,
};

const KEY_STATS: StrategyDescriptor = StrategyDescriptor {
    category: Category::KeyStats,
    adapter: AdapterKind::QuoteSnapshot,
    source: "yahoo quotes",
    display_name: "key statistics",
    fields: &[],
    default_lookback_days: None,
    lookback_ceiling_days: None,
};

const ECONOMIC_DATA: StrategyDescriptor = StrategyDescriptor {
    category: Category::EconomicData,
    adapter: AdapterKind::TimeSeries {
        kind: SeriesKind::Economic,
        source: SeriesSource::Fred,
    },
    source: "FRED",
    display_name: "economic data",
    fields: &["date", "price"],
    default_lookback_days: Some(TEN_YEARS),
    lookback_ceiling_days: None,
};

const EXCHANGE_RATES: StrategyDescriptor = StrategyDescriptor {
    category: Category::ExchangeRates,
    adapter: AdapterKind::TimeSeries {
        kind: SeriesKind::Fx,
        source: SeriesSource::Oanda,
    },
    source: "oanda",
    display_name: "exchange rates",
    fields: &["date", "exchange.rate"],
    default_lookback_days: Some(OANDA_CEILING),
    lookback_ceiling_days: Some(OANDA_CEILING),
};

const METAL_PRICES: StrategyDescriptor = StrategyDescriptor {
    category: Category::MetalPrices,
    adapter: AdapterKind::TimeSeries {
        kind: SeriesKind::Metal,
        source: SeriesSource::Oanda,
    },
    source: "oanda",
    display_name: "metal prices",
    fields: &["date", "price"],
    default_lookback_days: Some(OANDA_CEILING),
    lookback_ceiling_days: Some(OANDA_CEILING),
};

const QUANDL: StrategyDescriptor = StrategyDescriptor {
    category: Category::Quandl,
    adapter: AdapterKind::MarketplaceDataset,
    source: "quandl",
    display_name: "marketplace dataset",
    fields: &[],
    default_lookback_days: None,
    lookback_ceiling_days: None,
};

const QUANDL_DATATABLE: StrategyDescriptor = StrategyDescriptor {
    category: Category::QuandlDatatable,
    adapter: AdapterKind::MarketplaceDatatable,
    source: "quandl",
    display_name: "marketplace datatable",
    fields: &[],
    default_lookback_days: None,
    lookback_ceiling_days: None,
};

/// Descriptor for `category`.
#[must_use]
pub const fn lookup(category: Category) -> &'static StrategyDescriptor {
    match category {
        Category::StockPrices => &STOCK_PRICES,
        Category::Dividends => &DIVIDENDS,
        Category::Splits => &SPLITS,
        Category::Financials => &FINANCIALS,
        Category::KeyRatios => &KEY_RATIOS,
        Category::KeyStats => &KEY_STATS,
        Category::EconomicData => &ECONOMIC_DATA,
        Category::ExchangeRates => &EXCHANGE_RATES,
        Category::MetalPrices => &METAL_PRICES,
        Category::Quandl => &QUANDL,
        Category::QuandlDatatable => &QUANDL_DATATABLE,
    }
}
