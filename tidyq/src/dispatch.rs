use tidyq_core::{Category, Diagnostic, DiagnosticKind, GetOptions, Retrieval, TidyqError};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::resolve::resolve;
use crate::strategy::lookup;

/// Result of one symbol/category retrieval with the notices it raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Table or isolated failure.
    pub result: Retrieval,
    /// Notices in emission order. In standalone mode a failure adds exactly
    /// one `RetrievalFailed` entry; in batch mode the mapper reports it.
    pub warnings: Vec<Diagnostic>,
}

/// Reject argument-contract violations before any provider is touched.
pub(crate) fn validate_request(symbol: &str, options: &GetOptions) -> Result<(), TidyqError> {
    if symbol.trim().is_empty() {
        return Err(TidyqError::InvalidSymbol(
            "symbol must be a non-empty string".to_string(),
        ));
    }
    if let (Some(from), Some(to)) = (options.from, options.to)
        && from > to
    {
        return Err(TidyqError::InvalidArg(format!(
            "from ({from}) is after to ({to})"
        )));
    }
    Ok(())
}

impl Tidyq {
    /// Resolve `category`, look up its strategy and run the adapter for `symbol`.
    ///
    /// Upstream faults and missing data come back as `Retrieval::Failure`.
    ///
    /// # Errors
    /// Only argument violations escape: `InvalidCategory`, `InvalidSymbol`
    /// and `InvalidArg` for a reversed window.
    pub async fn dispatch(
        &self,
        symbol: &str,
        category: &str,
        batch_mode: bool,
        options: &GetOptions,
    ) -> Result<Dispatched, TidyqError> {
        let cat = resolve(category)?;
        self.dispatch_resolved(symbol, cat, batch_mode, options).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidyq::dispatch",
            skip(self, options),
            fields(symbol = %symbol, category = %category, batch_mode = batch_mode),
        )
    )]
    pub(crate) async fn dispatch_resolved(
        &self,
        symbol: &str,
        category: Category,
        batch_mode: bool,
        options: &GetOptions,
    ) -> Result<Dispatched, TidyqError> {
        validate_request(symbol, options)?;
        let desc = lookup(category);
        let mut ctx = FetchContext::new(symbol, category, options, batch_mode);

        let result = match self.run_adapter(&mut ctx, desc).await {
            Ok(table) => Retrieval::Success(table),
            Err(e) => {
                if !ctx.batch_mode {
                    let message = format!("x = '{symbol}', get = '{category}': {e}");
                    ctx.warn(DiagnosticKind::RetrievalFailed(e.clone()), message);
                }
                Retrieval::Failure(e)
            }
        };
        Ok(Dispatched {
            result,
            warnings: ctx.warnings,
        })
    }
}
