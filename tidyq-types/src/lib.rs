//! Shared tidyq types: the error taxonomy, the category enumeration,
//! connector capability labels, configuration and diagnostics.
#![warn(missing_docs)]

mod capability;
mod category;
mod config;
mod diagnostic;
mod error;

pub use capability::Capability;
pub use category::Category;
pub use config::{DEFAULT_KEY_RATIO_VENUES, TidyqConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::TidyqError;
