use std::collections::BTreeMap;

use tidyq_core::credentials::MARKETPLACE_KEY_ENV;
use tidyq_core::{DiagnosticKind, MarketplaceQuery, TidyTable, TidyqError};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::normalize::marketplace::frame_to_table;
use crate::strategy::StrategyDescriptor;

/// Options the marketplace adapter always overrides, with the enforced value.
const POLICY: [(&str, &str); 3] = [("type", "raw"), ("meta", "false"), ("order", "asc")];

fn truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "t" | "1" | "yes")
}

impl Tidyq {
    /// Build the upstream query: credential, policy overrides, window remap.
    ///
    /// Returns the query and whether pagination was requested.
    fn marketplace_query(
        &self,
        ctx: &mut FetchContext<'_>,
        send_order: bool,
    ) -> (MarketplaceQuery, bool) {
        let api_key = self.credentials.marketplace_key();
        if api_key.is_none() {
            ctx.warn(
                DiagnosticKind::MissingCredential,
                format!(
                    "No marketplace API key found ({MARKETPLACE_KEY_ENV} unset); anonymous usage limits apply."
                ),
            );
        }

        let mut params: BTreeMap<String, String> = ctx.options.params.clone();
        for (option, required) in POLICY {
            if let Some(requested) = params.remove(option)
                && !requested.trim().eq_ignore_ascii_case(required)
            {
                ctx.warn(
                    DiagnosticKind::PolicyOverride {
                        option: option.to_string(),
                        requested: requested.clone(),
                        applied: required.to_string(),
                    },
                    format!("{option} = '{requested}' is not supported; using {option} = '{required}'"),
                );
            }
        }
        let paginate = params.remove("paginate").is_some_and(|v| truthy(&v));

        let start = params
            .remove("from")
            .or_else(|| ctx.options.from.map(|d| d.to_string()));
        let end = params
            .remove("to")
            .or_else(|| ctx.options.to.map(|d| d.to_string()));

        let mut forwarded: Vec<(String, String)> = params.into_iter().collect();
        if let Some(s) = start {
            forwarded.push(("start_date".to_string(), s));
        }
        if let Some(e) = end {
            forwarded.push(("end_date".to_string(), e));
        }
        if send_order {
            forwarded.push(("order".to_string(), "asc".to_string()));
        }

        (
            MarketplaceQuery {
                code: ctx.symbol.trim().to_string(),
                params: forwarded,
                api_key,
            },
            paginate,
        )
    }

    /// Marketplace dataset adapter.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::adapter",
            skip(self, ctx, desc),
            fields(code = %ctx.symbol),
        )
    )]
    pub(crate) async fn fetch_dataset(
        &self,
        ctx: &mut FetchContext<'_>,
        desc: &'static StrategyDescriptor,
    ) -> Result<TidyTable, TidyqError> {
        let (query, _) = self.marketplace_query(ctx, true);
        let frame = self.dataset(&query).await?;
        frame_to_table(&frame, desc.source, &ctx.what())
    }

    /// Marketplace datatable adapter with optional cursor pagination.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::adapter",
            skip(self, ctx, desc),
            fields(code = %ctx.symbol),
        )
    )]
    pub(crate) async fn fetch_datatable(
        &self,
        ctx: &mut FetchContext<'_>,
        desc: &'static StrategyDescriptor,
    ) -> Result<TidyTable, TidyqError> {
        let (query, paginate) = self.marketplace_query(ctx, false);

        let mut page = self.datatable(&query, None).await?;
        let mut frame = std::mem::take(&mut page.frame);
        let mut pages: u32 = 1;
        while let Some(cursor) = page.next_cursor.take() {
            if !paginate || pages >= self.cfg.datatable_max_pages {
                let reason = if paginate {
                    format!("page cap of {} reached", self.cfg.datatable_max_pages)
                } else {
                    "set paginate = 'true' to retrieve every page".to_string()
                };
                ctx.warn(
                    DiagnosticKind::Truncated { pages },
                    format!(
                        "{} returned more rows than fetched after {pages} page(s); {reason}",
                        query.code
                    ),
                );
                break;
            }
            page = self.datatable(&query, Some(cursor.as_str())).await?;
            if page.frame.columns != frame.columns {
                return Err(TidyqError::upstream(
                    desc.source,
                    format!("page {} changed the column set", pages + 1),
                ));
            }
            frame.rows.append(&mut page.frame.rows);
            pages += 1;
        }
        frame_to_table(&frame, desc.source, &ctx.what())
    }
}
