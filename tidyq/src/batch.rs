use futures::stream::{self, StreamExt};
use tidyq_core::{
    BatchResult, BatchRow, Category, Diagnostic, DiagnosticKind, GetOptions, GetOutput, GetReport,
    Retrieval, SymbolInput, TidyTable, TidyqError, Value,
};

use crate::Tidyq;
use crate::context::record;
use crate::dispatch::validate_request;
use crate::resolve::{resolve, resolve_compound};
use crate::strategy::lookup;

/// Resolve the category list of one call.
///
/// A single category may be any category; several must all be compound-eligible.
pub(crate) fn resolve_categories<S: AsRef<str>>(raws: &[S]) -> Result<Vec<Category>, TidyqError> {
    match raws {
        [] => Err(TidyqError::InvalidArg(
            "at least one category is required".to_string(),
        )),
        [one] => Ok(vec![resolve(one.as_ref())?]),
        many => resolve_compound(many),
    }
}

impl Tidyq {
    /// Run every requested category over every input row with per-pair
    /// failure isolation.
    ///
    /// Categories are processed in order, each as one pass over the rows that
    /// survived the previous passes. With `drop_failures`, failed rows are
    /// removed after each pass with one `Dropped` diagnostic each; otherwise
    /// they stay inline with one `Retained` diagnostic each.
    ///
    /// A single category over a multi-valued input is flattened into one table
    /// (input columns, then the result columns) when the configuration allows
    /// it, no failures remain and every result shares one schema; otherwise the
    /// nested batch is returned with a `FlattenSkipped` notice.
    ///
    /// # Errors
    /// Argument violations only: unknown or non-combinable categories, an empty
    /// category list, an empty symbol, a malformed input table or a reversed window.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidyq::map_batch",
            skip(self, input, categories, options),
            fields(categories = categories.len(), drop_failures = drop_failures),
        )
    )]
    pub async fn map_batch<S: AsRef<str> + Sync>(
        &self,
        input: impl Into<SymbolInput>,
        categories: &[S],
        drop_failures: bool,
        options: &GetOptions,
    ) -> Result<GetReport, TidyqError> {
        let input = input.into();
        let multi_valued = !input.is_single();
        let cats = resolve_categories(categories)?;
        let table = input.into_table()?;
        for row in table.rows() {
            validate_request(row[0].as_text().unwrap_or_default(), options)?;
        }

        let key_columns = table.columns().to_vec();
        let mut rows: Vec<BatchRow> = table
            .into_rows()
            .into_iter()
            .map(|key| BatchRow {
                key,
                results: Vec::with_capacity(cats.len()),
            })
            .collect();
        let mut warnings: Vec<Diagnostic> = Vec::new();

        for &cat in &cats {
            let symbols: Vec<String> = rows.iter().map(|r| r.symbol().to_string()).collect();
            let outcomes: Vec<_> = stream::iter(symbols.iter())
                .map(|s| self.dispatch_resolved(s, cat, true, options))
                .buffered(self.cfg.batch_concurrency)
                .collect()
                .await;

            let mut keep = Vec::with_capacity(rows.len());
            for ((row, outcome), symbol) in rows.iter_mut().zip(outcomes).zip(&symbols) {
                let dispatched = outcome?;
                for w in dispatched.warnings {
                    record(&mut warnings, w);
                }
                let failed = match &dispatched.result {
                    Retrieval::Failure(e) if drop_failures => {
                        let d = Diagnostic::new(
                            symbol.as_str(),
                            cat,
                            DiagnosticKind::Dropped(e.clone()),
                            format!("x = '{symbol}', get = '{cat}': {e}. Removing {symbol}."),
                        );
                        record(&mut warnings, d);
                        true
                    }
                    Retrieval::Failure(e) => {
                        let d = Diagnostic::new(
                            symbol.as_str(),
                            cat,
                            DiagnosticKind::Retained(e.clone()),
                            format!("x = '{symbol}', get = '{cat}': {e}"),
                        );
                        record(&mut warnings, d);
                        false
                    }
                    Retrieval::Success(_) => false,
                };
                row.results.push(dispatched.result);
                keep.push(!failed);
            }
            let mut flags = keep.into_iter();
            rows.retain(|_| flags.next().unwrap_or(true));
        }

        let batch = BatchResult {
            key_columns,
            categories: cats.clone(),
            rows,
        };

        let output = match cats.as_slice() {
            [only] if multi_valued && self.cfg.flatten_single_category => {
                match flatten(&batch, *only) {
                    Some(t) => GetOutput::Table(t),
                    None => {
                        record(
                            &mut warnings,
                            Diagnostic::general(
                                DiagnosticKind::FlattenSkipped,
                                format!(
                                    "{only}: results could not be combined into one table; returning nested results"
                                ),
                            ),
                        );
                        GetOutput::Batch(batch)
                    }
                }
            }
            _ => GetOutput::Batch(batch),
        };
        Ok(GetReport { output, warnings })
    }

    /// Retrieve `categories` for `input`.
    ///
    /// A single symbol with a single category yields `GetOutput::Table` or
    /// `GetOutput::Failed` plus one diagnostic; every other shape goes through
    /// [`Tidyq::map_batch`] with the configured `drop_failures`.
    ///
    /// # Errors
    /// Argument violations only; see [`Tidyq::map_batch`].
    pub async fn get<S: AsRef<str> + Sync>(
        &self,
        input: impl Into<SymbolInput>,
        categories: &[S],
        options: &GetOptions,
    ) -> Result<GetReport, TidyqError> {
        let input = input.into();
        if let (SymbolInput::One(symbol), [category]) = (&input, categories) {
            let cat = resolve(category.as_ref())?;
            let d = self.dispatch_resolved(symbol, cat, false, options).await?;
            let output = match d.result {
                Retrieval::Success(t) => GetOutput::Table(t),
                Retrieval::Failure(e) => GetOutput::Failed(e),
            };
            return Ok(GetReport {
                output,
                warnings: d.warnings,
            });
        }
        self.map_batch(input, categories, self.cfg.drop_failures, options)
            .await
    }
}

/// Unnest a single-category batch, or `None` if the shape is not uniform.
fn flatten(batch: &BatchResult, category: Category) -> Option<TidyTable> {
    if batch.has_failures() {
        return None;
    }
    let col = category.as_str();
    if batch.is_empty() {
        let fields = lookup(category).fields;
        if batch.key_columns.iter().any(|k| fields.contains(&k.as_str())) {
            return None;
        }
        return Some(TidyTable::new(
            batch
                .key_columns
                .iter()
                .map(String::as_str)
                .chain(fields.iter().copied()),
        ));
    }

    let mut nested = TidyTable::new(
        batch
            .key_columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(col)),
    );
    for row in &batch.rows {
        let table = row.results.first()?.table()?.clone();
        let mut cells = row.key.clone();
        cells.push(Value::from(table));
        nested.push_row(cells).ok()?;
    }
    nested.unnest(col).ok()
}
