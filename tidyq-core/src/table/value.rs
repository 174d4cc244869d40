use core::cmp::Ordering;
use core::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TidyTable;

/// A single cell of a [`TidyTable`].
///
/// Embedded tables are first-class cells so nested shapes (per-symbol
/// sub-tables, per-statement sub-tables) stay typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// Missing observation.
    #[default]
    Null,
    /// Numeric observation.
    Number(Decimal),
    /// Free text or identifier.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Embedded sub-table.
    Table(Box<TidyTable>),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric payload, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<Decimal> {
        match self {
            Self::Number(d) => Some(*d),
            _ => None,
        }
    }

    /// Text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Date payload, if any.
    #[must_use]
    pub const fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Embedded table, if any.
    #[must_use]
    pub fn as_table(&self) -> Option<&TidyTable> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Date(_) => 3,
            Self::Table(_) => 4,
        }
    }

    /// Total order used for sorting rows: nulls first, then by kind, then by payload.
    /// Embedded tables compare by row count.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Table(a), Self::Table(b)) => a.len().cmp(&b.len()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NA"),
            Self::Number(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{d}"),
            Self::Table(t) => write!(f, "<table [{} x {}]>", t.len(), t.width()),
        }
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Number(d)
    }
}

impl From<Option<Decimal>> for Value {
    fn from(d: Option<Decimal>) -> Self {
        d.map_or(Self::Null, Self::Number)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(Decimal::from(n))
    }
}

impl From<TidyTable> for Value {
    fn from(t: TidyTable) -> Self {
        Self::Table(Box::new(t))
    }
}
