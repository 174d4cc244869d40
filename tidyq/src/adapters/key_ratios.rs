use chrono::{Datelike, NaiveDate};
use tidyq_core::{TidyTable, TidyqError};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::normalize::ratio_report::{
    is_placeholder, parse_report, ratio_rows_to_table, valuation_rows, year_end_closes,
};

impl Tidyq {
    /// Download the first non-placeholder report body across venues.
    ///
    /// Each venue gets `key_ratio_attempts` tries on transport errors; a
    /// placeholder or `NotFound` moves on to the next venue at once.
    async fn download_report(&self, symbol: &str) -> Result<String, TidyqError> {
        let venues = &self.cfg.key_ratio_venues;
        let mut errors: Vec<TidyqError> = Vec::new();

        for venue in venues {
            let mut last_err = None;
            for _attempt in 0..self.cfg.key_ratio_attempts {
                match self.report(symbol, venue).await {
                    Ok(body) if is_placeholder(&body) => {
                        last_err = None;
                        break;
                    }
                    Ok(body) => return Ok(body),
                    Err(TidyqError::NotFound { .. }) => {
                        last_err = None;
                        break;
                    }
                    Err(e @ TidyqError::Unsupported { .. }) => return Err(e),
                    Err(e) => last_err = Some(e),
                }
            }
            if let Some(e) = last_err {
                errors.push(e);
            }
        }

        if errors.len() == venues.len() {
            return Err(crate::router::util::collapse_errors(
                tidyq_core::Capability::Report,
                true,
                errors,
                None,
            ));
        }
        Err(TidyqError::ReportUnavailable {
            symbol: symbol.to_string(),
            venues: venues.clone(),
        })
    }

    /// Key-ratio adapter: venue loop, layout detection, parse, valuation join.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::adapter",
            skip(self, ctx),
            fields(symbol = %ctx.symbol),
        )
    )]
    pub(crate) async fn fetch_key_ratios(
        &self,
        ctx: &mut FetchContext<'_>,
    ) -> Result<TidyTable, TidyqError> {
        let symbol = ctx.symbol.trim();
        let body = self.download_report(symbol).await?;
        let layout = self.layout.detect(&body)?;
        let mut rows = parse_report(&body, &layout, ctx.as_of)?;

        let first_year = rows
            .iter()
            .filter(|r| r.section == "Financials" && !r.trailing)
            .map(|r| r.date.year())
            .min();
        if let Some(year) = first_year {
            let from = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(ctx.as_of);
            let prices = self.price_table(symbol, from, ctx.as_of).await?;
            let closes = year_end_closes(&prices);
            let valuation = valuation_rows(&rows, &closes, layout.groups() + 1);
            rows.extend(valuation);
        }
        ratio_rows_to_table(&rows)
    }
}
