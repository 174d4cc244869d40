use chrono::NaiveDate;
use tidyq_core::{Category, Diagnostic, DiagnosticKind, GetOptions};

/// Per-retrieval state handed to adapters.
pub(crate) struct FetchContext<'a> {
    pub symbol: &'a str,
    pub category: Category,
    pub options: &'a GetOptions,
    pub as_of: NaiveDate,
    pub batch_mode: bool,
    pub warnings: Vec<Diagnostic>,
}

impl<'a> FetchContext<'a> {
    pub(crate) fn new(
        symbol: &'a str,
        category: Category,
        options: &'a GetOptions,
        batch_mode: bool,
    ) -> Self {
        Self {
            symbol,
            category,
            options,
            as_of: options.reference_date(),
            batch_mode,
            warnings: Vec::new(),
        }
    }

    /// Record a non-fatal notice attributed to this symbol and category.
    pub(crate) fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let d = Diagnostic::new(self.symbol, self.category, kind, message);
        record(&mut self.warnings, d);
    }

    /// "category for SYMBOL", used in not-found style messages.
    pub(crate) fn what(&self) -> String {
        format!("{} for {}", self.category, self.symbol)
    }
}

/// Append a diagnostic, logging it when tracing is enabled.
pub(crate) fn record(sink: &mut Vec<Diagnostic>, d: Diagnostic) {
    #[cfg(feature = "tracing")]
    tracing::warn!(
        target: "tidyq::diagnostics",
        symbol = d.symbol.as_deref().unwrap_or(""),
        category = d.category.map_or("", |c| c.as_str()),
        "{}",
        d.message
    );
    sink.push(d);
}
