//! Request-side types: symbol input shapes and per-call options.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TidyqError;
use crate::table::{TidyTable, Value};

/// Options for one `get` call.
///
/// `from`/`to` bound time-series windows; `as_of` stands in for "today" when
/// computing default windows, lookback ceilings and trailing-period dates.
/// `params` is an open bag forwarded to the marketplace adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetOptions {
    /// Inclusive window start.
    pub from: Option<NaiveDate>,
    /// Inclusive window end.
    pub to: Option<NaiveDate>,
    /// Reference date; defaults to the local current date.
    pub as_of: Option<NaiveDate>,
    /// Free-form options (e.g. `type`, `order`, `paginate`, `ticker`).
    pub params: BTreeMap<String, String>,
}

impl GetOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window start.
    #[must_use]
    pub const fn from(mut self, d: NaiveDate) -> Self {
        self.from = Some(d);
        self
    }

    /// Set the window end.
    #[must_use]
    pub const fn to(mut self, d: NaiveDate) -> Self {
        self.to = Some(d);
        self
    }

    /// Set the reference date.
    #[must_use]
    pub const fn as_of(mut self, d: NaiveDate) -> Self {
        self.as_of = Some(d);
        self
    }

    /// Add a free-form option.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The reference date, falling back to today.
    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Shape of the symbol argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolInput {
    /// One symbol.
    One(String),
    /// Several symbols.
    Many(Vec<String>),
    /// A table whose first column holds symbols; other columns are carried
    /// through to batch output.
    Table(TidyTable),
}

impl SymbolInput {
    /// Whether the input is a single bare symbol.
    #[must_use]
    pub const fn is_single(&self) -> bool {
        matches!(self, Self::One(_))
    }

    /// Convert to a key table (symbol column first).
    ///
    /// # Errors
    /// Returns `InvalidArg` for a table with no columns or a symbol column
    /// holding non-text values.
    pub fn into_table(self) -> Result<TidyTable, TidyqError> {
        match self {
            Self::One(s) => TidyTable::from_rows(["symbol"], vec![vec![Value::from(s)]]),
            Self::Many(v) => TidyTable::from_rows(
                ["symbol"],
                v.into_iter().map(|s| vec![Value::from(s)]).collect(),
            ),
            Self::Table(t) => {
                if t.width() == 0 {
                    return Err(TidyqError::InvalidArg(
                        "symbol table has no columns".into(),
                    ));
                }
                if t.rows().iter().any(|r| r[0].as_text().is_none()) {
                    return Err(TidyqError::InvalidArg(format!(
                        "first column '{}' must hold symbols as text",
                        t.columns()[0]
                    )));
                }
                Ok(t)
            }
        }
    }
}

impl From<&str> for SymbolInput {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

impl From<String> for SymbolInput {
    fn from(s: String) -> Self {
        Self::One(s)
    }
}

impl From<Vec<String>> for SymbolInput {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

impl From<Vec<&str>> for SymbolInput {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SymbolInput {
    fn from(v: [&str; N]) -> Self {
        Self::Many(v.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<TidyTable> for SymbolInput {
    fn from(t: TidyTable) -> Self {
        Self::Table(t)
    }
}
