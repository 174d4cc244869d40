//! tidyq-core
//!
//! Shared building blocks for the tidyq workspace.
//!
//! - `table`: the `TidyTable`/`Value` model with nest and unnest operations.
//! - `connector`: the `TidyqConnector` trait and capability provider traits.
//! - `types`: raw provider response shapes the adapters normalize.
//! - `request` / `reports`: call inputs and result envelopes.
//!
//! Connector traits are async (`async-trait`) and the orchestrator drives them
//! on Tokio; nothing in this crate spawns tasks itself.
#![warn(missing_docs)]

/// Connector capability traits and the primary `TidyqConnector` interface.
pub mod connector;
/// Marketplace credential stores.
pub mod credentials;
/// Result envelopes.
pub mod reports;
/// Symbol input shapes and call options.
pub mod request;
/// Tidy table model.
pub mod table;
pub mod types;

pub use connector::TidyqConnector;
pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use reports::{BatchResult, BatchRow, GetOutput, GetReport, Retrieval};
pub use request::{GetOptions, SymbolInput};
pub use table::{TidyTable, Value};
pub use tidyq_types::{
    Capability, Category, DEFAULT_KEY_RATIO_VENUES, Diagnostic, DiagnosticKind, TidyqConfig,
    TidyqError,
};
pub use types::*;
