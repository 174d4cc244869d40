use tidyq_core::{TidyTable, TidyqError};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::normalize::statements::financials_to_table;
use crate::strategy::StrategyDescriptor;

impl Tidyq {
    /// Financial statements adapter.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::adapter",
            skip(self, ctx, desc),
            fields(symbol = %ctx.symbol),
        )
    )]
    pub(crate) async fn fetch_financials(
        &self,
        ctx: &mut FetchContext<'_>,
        desc: &'static StrategyDescriptor,
    ) -> Result<TidyTable, TidyqError> {
        let raw = self.financials(ctx.symbol.trim()).await?;
        financials_to_table(&raw, desc.source, &ctx.what())
    }
}
