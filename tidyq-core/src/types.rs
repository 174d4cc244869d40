//! Raw response shapes returned by connector capability traits.
//!
//! These are the provider-side views the adapters normalize into tidy tables.
//! They carry no presentation logic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upstream family serving a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesSource {
    /// Equity price/dividend/split history.
    Yahoo,
    /// Federal Reserve economic data.
    Fred,
    /// Currency and precious metal rates (rolling lookback limit).
    Oanda,
}

impl SeriesSource {
    /// Display name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Fred => "FRED",
            Self::Oanda => "oanda",
        }
    }
}

/// Which flavour of series is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    /// OHLCV plus adjusted close.
    Prices,
    /// Cash dividends per share.
    Dividends,
    /// Split ratios.
    Splits,
    /// Single-valued economic indicator.
    Economic,
    /// Currency pair rate (`BASE/QUOTE`).
    Fx,
    /// Precious metal price against a currency (ISO metal code as base).
    Metal,
}

/// Parameters for a time-series call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRequest {
    /// Upstream symbol or code, already mapped for the source.
    pub symbol: String,
    /// Series flavour.
    pub kind: SeriesKind,
    /// Source family.
    pub source: SeriesSource,
    /// Inclusive window start.
    pub from: NaiveDate,
    /// Inclusive window end.
    pub to: NaiveDate,
}

/// One dated observation of a raw series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// One value per field of the owning series; `None` for missing.
    pub values: Vec<Option<Decimal>>,
}

/// Native indexed series as returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawSeries {
    /// Field names in the order of `SeriesPoint::values`.
    pub fields: Vec<String>,
    /// Observations, in provider order.
    pub points: Vec<SeriesPoint>,
}

/// Financial statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
    /// Income statement.
    IncomeStatement,
    /// Balance sheet.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
}

impl StatementType {
    /// Every statement in output order.
    pub const ALL: [Self; 3] = [Self::IncomeStatement, Self::BalanceSheet, Self::CashFlow];

    /// Two-letter code used in the `type` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::IncomeStatement => "IS",
            Self::BalanceSheet => "BS",
            Self::CashFlow => "CF",
        }
    }
}

/// Reporting period of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementPeriod {
    /// Fiscal years.
    Annual,
    /// Fiscal quarters.
    Quarterly,
}

impl StatementPeriod {
    /// Column name used in the pivoted financials table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarter",
        }
    }
}

/// One line of a wide statement: a category with one value per period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Line item label, e.g. "Revenue".
    pub category: String,
    /// One value per entry of `RawStatement::periods`.
    pub values: Vec<Option<Decimal>>,
}

/// A wide category-by-period statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatement {
    /// Statement kind.
    pub statement: StatementType,
    /// Period granularity.
    pub period: StatementPeriod,
    /// Period end dates, one per value column.
    pub periods: Vec<NaiveDate>,
    /// Line items in statement order.
    pub lines: Vec<StatementLine>,
}

/// All statements a provider returned for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RawFinancials {
    /// Statements in any order; the adapter reorders them.
    pub statements: Vec<RawStatement>,
}

/// Parameters for a marketplace call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceQuery {
    /// Dataset or datatable code, e.g. "WIKI/AAPL".
    pub code: String,
    /// Query parameters forwarded verbatim, in order.
    pub params: Vec<(String, String)>,
    /// API key, when one is configured.
    pub api_key: Option<String>,
}

/// Column-oriented payload of a marketplace response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MarketplaceFrame {
    /// Column names as published.
    pub columns: Vec<String>,
    /// Rows of raw JSON cells.
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// One page of a datatable response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MarketplacePage {
    /// Page payload.
    pub frame: MarketplaceFrame,
    /// Cursor for the next page, if more rows exist.
    pub next_cursor: Option<String>,
}
