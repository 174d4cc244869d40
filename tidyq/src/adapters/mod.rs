//! Retrieval adapters: provider call, provider-specific recovery, reshape.

pub mod fundamentals;
pub mod key_ratios;
pub mod key_stats;
pub mod marketplace;
pub mod timeseries;

use tidyq_core::{TidyTable, TidyqError};

use crate::Tidyq;
use crate::context::FetchContext;
use crate::strategy::{AdapterKind, StrategyDescriptor};

impl Tidyq {
    /// Run the adapter named by `desc` for the context's symbol.
    pub(crate) async fn run_adapter(
        &self,
        ctx: &mut FetchContext<'_>,
        desc: &'static StrategyDescriptor,
    ) -> Result<TidyTable, TidyqError> {
        match desc.adapter {
            AdapterKind::TimeSeries { kind, source } => {
                self.fetch_time_series(ctx, desc, kind, source).await
            }
            AdapterKind::Fundamentals => self.fetch_financials(ctx, desc).await,
            AdapterKind::RatioReport => self.fetch_key_ratios(ctx).await,
            AdapterKind::QuoteSnapshot => self.fetch_key_stats(ctx, desc).await,
            AdapterKind::MarketplaceDataset => self.fetch_dataset(ctx, desc).await,
            AdapterKind::MarketplaceDatatable => self.fetch_datatable(ctx, desc).await,
        }
    }
}
