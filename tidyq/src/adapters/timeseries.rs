use chrono::{Days, NaiveDate};
use tidyq_core::{
    Category, DiagnosticKind, GetOptions, SeriesKind, SeriesRequest, SeriesSource, TidyTable,
    TidyqError,
};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::normalize::series::series_to_table;
use crate::strategy::{StrategyDescriptor, lookup};

/// Effective request window after defaults and lookback ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Set when a caller-supplied start was moved forward to the ceiling.
    pub clamped: bool,
}

fn days_before(d: NaiveDate, days: u32) -> NaiveDate {
    d.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Compute the window for `desc`.
///
/// `to` defaults to `as_of` and `from` to `to` minus the default lookback.
/// With a ceiling, a window ending before the earliest servable date fails
/// and an earlier start is moved forward.
pub(crate) fn window_for(
    options: &GetOptions,
    as_of: NaiveDate,
    desc: &StrategyDescriptor,
) -> Result<Window, TidyqError> {
    let to = options.to.unwrap_or(as_of);
    let mut from = options
        .from
        .unwrap_or_else(|| days_before(to, desc.default_lookback_days.unwrap_or(0)));
    let mut clamped = false;

    if let Some(ceiling) = desc.lookback_ceiling_days {
        let earliest = days_before(as_of, ceiling);
        if to < earliest {
            return Err(TidyqError::WindowOutOfRange {
                source_name: desc.source.to_string(),
                to: to.to_string(),
                earliest: earliest.to_string(),
                ceiling_days: ceiling,
            });
        }
        if from < earliest {
            clamped = options.from.is_some();
            from = earliest;
        }
    }
    Ok(Window { from, to, clamped })
}

fn metal_code(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "gold" | "xau" => Some("XAU"),
        "silver" | "xag" => Some("XAG"),
        "platinum" | "xpt" => Some("XPT"),
        "palladium" | "xpd" => Some("XPD"),
        _ => None,
    }
}

fn is_currency_code(s: &str) -> bool {
    s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Map a user symbol to the form the source expects.
///
/// FX pairs are `BASE/QUOTE`; metals accept a name or ISO code with an
/// optional `/QUOTE` suffix (default USD).
pub(crate) fn upstream_symbol(kind: SeriesKind, raw: &str) -> Result<String, TidyqError> {
    let raw = raw.trim();
    match kind {
        SeriesKind::Prices | SeriesKind::Dividends | SeriesKind::Splits | SeriesKind::Economic => {
            Ok(raw.to_string())
        }
        SeriesKind::Fx => match raw.split_once('/') {
            Some((b, q)) if is_currency_code(b.trim()) && is_currency_code(q.trim()) => Ok(
                format!("{}/{}", b.trim().to_uppercase(), q.trim().to_uppercase()),
            ),
            _ => Err(TidyqError::not_found(format!(
                "exchange rate pair '{raw}' (expected BASE/QUOTE, e.g. EUR/USD)"
            ))),
        },
        SeriesKind::Metal => {
            let (metal, quote) = raw.split_once('/').unwrap_or((raw, "USD"));
            match metal_code(metal.trim()) {
                Some(code) if is_currency_code(quote.trim()) => {
                    Ok(format!("{code}/{}", quote.trim().to_uppercase()))
                }
                _ => Err(TidyqError::not_found(format!(
                    "metal '{raw}' (expected gold, silver, platinum or palladium)"
                ))),
            }
        }
    }
}

impl Tidyq {
    /// Time-series adapter: window, ceiling, symbol mapping, fetch, reshape.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::adapter",
            skip(self, ctx, desc),
            fields(symbol = %ctx.symbol, category = %ctx.category),
        )
    )]
    pub(crate) async fn fetch_time_series(
        &self,
        ctx: &mut FetchContext<'_>,
        desc: &'static StrategyDescriptor,
        kind: SeriesKind,
        source: SeriesSource,
    ) -> Result<TidyTable, TidyqError> {
        let w = window_for(ctx.options, ctx.as_of, desc)?;
        if w.clamped {
            ctx.warn(
                DiagnosticKind::PartialWindow {
                    effective_from: w.from.to_string(),
                },
                format!(
                    "x = '{}', get = '{}': {} only serves the last {} days; returning data from {}",
                    ctx.symbol,
                    ctx.category,
                    desc.source,
                    desc.lookback_ceiling_days.unwrap_or_default(),
                    w.from
                ),
            );
        }
        let req = SeriesRequest {
            symbol: upstream_symbol(kind, ctx.symbol)?,
            kind,
            source,
            from: w.from,
            to: w.to,
        };
        let raw = self.series(&req).await?;
        series_to_table(raw, desc, w.from, w.to, &ctx.what())
    }

    /// Daily prices for `symbol` over `[from, to]`, shaped like `stock.prices`.
    pub(crate) async fn price_table(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<TidyTable, TidyqError> {
        let desc = lookup(Category::StockPrices);
        let req = SeriesRequest {
            symbol: symbol.trim().to_string(),
            kind: SeriesKind::Prices,
            source: SeriesSource::Yahoo,
            from,
            to,
        };
        let raw = self.series(&req).await?;
        series_to_table(raw, desc, from, to, &format!("stock.prices for {symbol}"))
    }
}
