//! Result envelopes returned by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::table::{TidyTable, Value};
use crate::{Category, Diagnostic, TidyqError};

/// Outcome of one symbol/category retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Retrieval {
    /// Normalized table.
    Success(TidyTable),
    /// Isolated failure with its cause.
    Failure(TidyqError),
}

impl Retrieval {
    /// Returns true for [`Retrieval::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The table, if successful.
    #[must_use]
    pub const fn table(&self) -> Option<&TidyTable> {
        match self {
            Self::Success(t) => Some(t),
            Self::Failure(_) => None,
        }
    }

    /// The failure cause, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&TidyqError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(e) => Some(e),
        }
    }
}

impl From<Result<TidyTable, TidyqError>> for Retrieval {
    fn from(r: Result<TidyTable, TidyqError>) -> Self {
        match r {
            Ok(t) => Self::Success(t),
            Err(e) => Self::Failure(e),
        }
    }
}

/// One input row with its per-category results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Values of the input columns (symbol first).
    pub key: Vec<Value>,
    /// One result per requested category, in request order.
    pub results: Vec<Retrieval>,
}

impl BatchRow {
    /// The symbol of this row.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.key.first().and_then(Value::as_text).unwrap_or_default()
    }
}

/// Nested batch output: input columns plus one result column per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// Input column names (symbol first).
    pub key_columns: Vec<String>,
    /// Requested categories, one result column each.
    pub categories: Vec<Category>,
    /// Surviving rows in input order.
    pub rows: Vec<BatchRow>,
}

impl BatchResult {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when every row was dropped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any cell still holds a failure.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.results.iter().any(Retrieval::is_failure))
    }

    /// Symbols in row order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(BatchRow::symbol)
    }

    /// Result of `category` for `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &str, category: Category) -> Option<&Retrieval> {
        let col = self.categories.iter().position(|c| *c == category)?;
        self.rows
            .iter()
            .find(|r| r.symbol() == symbol)
            .and_then(|r| r.results.get(col))
    }
}

/// Shape of a `get` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GetOutput {
    /// Flat table: single symbol/category success, or a flattened batch.
    Table(TidyTable),
    /// Single symbol/category failure.
    Failed(TidyqError),
    /// Nested batch.
    Batch(BatchResult),
}

impl GetOutput {
    /// The flat table, if any.
    #[must_use]
    pub const fn as_table(&self) -> Option<&TidyTable> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The batch, if any.
    #[must_use]
    pub const fn as_batch(&self) -> Option<&BatchResult> {
        match self {
            Self::Batch(b) => Some(b),
            _ => None,
        }
    }
}

/// Output of `get` together with every diagnostic raised while producing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReport {
    /// Result payload.
    pub output: GetOutput,
    /// Diagnostics in emission order.
    pub warnings: Vec<Diagnostic>,
}
