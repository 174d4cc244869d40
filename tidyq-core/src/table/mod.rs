//! Row-per-observation tables with a fixed column schema.

mod value;

pub use value::Value;

use serde::{Deserialize, Serialize};
use tidyq_types::TidyqError;

/// An ordered, schema-stable table.
///
/// Every row has exactly one value per column; constructors and mutators
/// reject ragged rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TidyTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl TidyTable {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows.
    ///
    /// # Errors
    /// Returns `TidyqError::Data` if any row width differs from the column count.
    pub fn from_rows<I, S>(columns: I, rows: Vec<Vec<Value>>) -> Result<Self, TidyqError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut t = Self::new(columns);
        for row in rows {
            t.push_row(row)?;
        }
        Ok(t)
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns `TidyqError::Data` if the row width differs from the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TidyqError> {
        if row.len() != self.columns.len() {
            return Err(TidyqError::Data(format!(
                "row has {} values but table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Consume the table and return its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the values of one column.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Value at `row` in column `name`.
    #[must_use]
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Stable sort on one column using [`Value::sort_cmp`].
    ///
    /// # Errors
    /// Returns `TidyqError::Data` if the column does not exist.
    pub fn sort_by_column(&mut self, name: &str) -> Result<(), TidyqError> {
        let idx = self.require(name)?;
        self.rows.sort_by(|a, b| a[idx].sort_cmp(&b[idx]));
        Ok(())
    }

    /// Group rows by the `keys` columns, moving the remaining columns into an
    /// embedded table stored in a new column named `nested`.
    ///
    /// Groups appear in order of first appearance.
    ///
    /// # Errors
    /// Returns `TidyqError::Data` if a key column does not exist.
    pub fn nest_by(&self, keys: &[&str], nested: &str) -> Result<Self, TidyqError> {
        let key_idx: Vec<usize> = keys
            .iter()
            .map(|k| self.require(k))
            .collect::<Result<_, _>>()?;
        let rest_idx: Vec<usize> = (0..self.columns.len())
            .filter(|i| !key_idx.contains(i))
            .collect();
        let rest_cols: Vec<String> = rest_idx.iter().map(|&i| self.columns[i].clone()).collect();

        let mut groups: Vec<(Vec<Value>, Self)> = Vec::new();
        for row in &self.rows {
            let key: Vec<Value> = key_idx.iter().map(|&i| row[i].clone()).collect();
            let inner: Vec<Value> = rest_idx.iter().map(|&i| row[i].clone()).collect();
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, t)) => t.rows.push(inner),
                None => {
                    let mut t = Self::new(rest_cols.clone());
                    t.rows.push(inner);
                    groups.push((key, t));
                }
            }
        }

        let mut out_cols: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        out_cols.push(nested.to_string());
        let mut out = Self::new(out_cols);
        for (mut key, t) in groups {
            key.push(Value::from(t));
            out.rows.push(key);
        }
        Ok(out)
    }

    /// Expand the embedded tables of column `name` so each inner row becomes
    /// one outer row (outer columns first, then the inner columns).
    ///
    /// # Errors
    /// Returns `TidyqError::Data` if the column is missing, a cell is not a
    /// table, the embedded schemas differ, or an inner column name collides
    /// with an outer one.
    pub fn unnest(&self, name: &str) -> Result<Self, TidyqError> {
        let idx = self.require(name)?;
        let mut inner_cols: Option<&[String]> = None;
        for row in &self.rows {
            let Value::Table(t) = &row[idx] else {
                return Err(TidyqError::Data(format!(
                    "column '{name}' holds a non-table value"
                )));
            };
            match inner_cols {
                None => inner_cols = Some(t.columns()),
                Some(cols) if cols == t.columns() => {}
                Some(_) => {
                    return Err(TidyqError::Data(format!(
                        "column '{name}' holds tables with differing schemas"
                    )));
                }
            }
        }

        let outer: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.clone())
            .collect();
        let inner: Vec<String> = inner_cols.map(<[String]>::to_vec).unwrap_or_default();
        if let Some(dup) = inner.iter().find(|c| outer.contains(c)) {
            return Err(TidyqError::Data(format!(
                "inner column '{dup}' collides with an outer column"
            )));
        }

        let mut out = Self::new(outer.iter().chain(inner.iter()).cloned());
        for row in &self.rows {
            let Value::Table(t) = &row[idx] else { continue };
            let prefix: Vec<Value> = row
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, v)| v.clone())
                .collect();
            for inner_row in t.rows() {
                let mut r = prefix.clone();
                r.extend(inner_row.iter().cloned());
                out.rows.push(r);
            }
        }
        Ok(out)
    }

    fn require(&self, name: &str) -> Result<usize, TidyqError> {
        self.column_index(name)
            .ok_or_else(|| TidyqError::Data(format!("no column named '{name}'")))
    }
}
