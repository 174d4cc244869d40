//! Configuration shared by the orchestrator and its adapters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Venues tried, in order, when downloading a key-ratio report.
pub const DEFAULT_KEY_RATIO_VENUES: [&str; 3] = ["XNAS", "XNYS", "XASE"];

/// Global configuration for the `Tidyq` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidyqConfig {
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Remove failed symbol rows from batch output after diagnosing them.
    pub drop_failures: bool,
    /// Flatten single-category batches of multiple symbols into one table.
    pub flatten_single_category: bool,
    /// Candidate venues for the key-ratio report, tried in order.
    pub key_ratio_venues: Vec<String>,
    /// Attempts per venue before moving to the next one (>= 1).
    pub key_ratio_attempts: u32,
    /// Symbol/category pairs of one batch pass allowed in flight (>= 1).
    ///
    /// Output order and diagnostics are the same for every value.
    pub batch_concurrency: usize,
    /// Upper bound on cursor pages followed for a paginated datatable.
    pub datatable_max_pages: u32,
}

impl Default for TidyqConfig {
    fn default() -> Self {
        Self {
            provider_timeout: Duration::from_secs(5),
            drop_failures: true,
            flatten_single_category: true,
            key_ratio_venues: DEFAULT_KEY_RATIO_VENUES
                .iter()
                .map(|v| (*v).to_string())
                .collect(),
            key_ratio_attempts: 3,
            batch_concurrency: 1,
            datatable_max_pages: 100,
        }
    }
}
