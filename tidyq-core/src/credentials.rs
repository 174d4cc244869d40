//! Marketplace credential lookup.

/// Environment variable consulted by [`EnvCredentials`].
pub const MARKETPLACE_KEY_ENV: &str = "QUANDL_API_KEY";

/// Source of the marketplace API key.
pub trait CredentialStore: Send + Sync {
    /// The configured key, if any. Blank keys count as absent.
    fn marketplace_key(&self) -> Option<String>;
}

/// Reads the key from `QUANDL_API_KEY` on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialStore for EnvCredentials {
    fn marketplace_key(&self) -> Option<String> {
        std::env::var(MARKETPLACE_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Fixed key supplied at construction, or none.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    /// Store that always returns `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Store that never has a key.
    #[must_use]
    pub const fn none() -> Self {
        Self { key: None }
    }
}

impl CredentialStore for StaticCredentials {
    fn marketplace_key(&self) -> Option<String> {
        self.key.clone().filter(|k| !k.trim().is_empty())
    }
}
