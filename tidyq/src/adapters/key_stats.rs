use tidyq_core::{TidyTable, TidyqError};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::normalize::quote_row::{quote_row_to_table, tag_codes};
use crate::strategy::StrategyDescriptor;

impl Tidyq {
    /// Quote statistics adapter.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::adapter",
            skip(self, ctx, desc),
            fields(symbol = %ctx.symbol),
        )
    )]
    pub(crate) async fn fetch_key_stats(
        &self,
        ctx: &mut FetchContext<'_>,
        desc: &'static StrategyDescriptor,
    ) -> Result<TidyTable, TidyqError> {
        let tags = tag_codes();
        let body = self.quote_fields(ctx.symbol.trim(), &tags).await?;
        quote_row_to_table(&body, desc.source, &ctx.what())
    }
}
