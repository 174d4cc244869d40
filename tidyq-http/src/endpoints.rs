use tidyq_core::TidyqError;
use url::Url;

/// Base URLs of every upstream the connector talks to.
///
/// [`Endpoints::public`] points at the public hosts; [`Endpoints::local`] roots
/// them all under one server, which is what tests use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Daily history download; the symbol is appended as a path segment.
    pub yahoo_history: Url,
    /// Tag-driven quote CSV.
    pub yahoo_quotes: Url,
    /// Economic series CSV.
    pub fred: Url,
    /// Currency and metal rates JSON.
    pub oanda: Url,
    /// Key-ratio report CSV export.
    pub morningstar: Url,
    /// Marketplace API root (`.../api/v3/`).
    pub quandl: Url,
}

const YAHOO_HISTORY: &str = "https://query1.finance.yahoo.com/v7/finance/download/";
const YAHOO_QUOTES: &str = "https://download.finance.yahoo.com/d/quotes.csv";
const FRED: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";
const OANDA: &str = "https://fxds-public-exchange-rates-api.oanda.com/cc-api/currencies";
const MORNINGSTAR: &str = "https://financials.morningstar.com/ajax/exportKR2CSV.html";
const QUANDL: &str = "https://www.quandl.com/api/v3/";

fn parse(raw: &str) -> Result<Url, TidyqError> {
    Url::parse(raw).map_err(|e| TidyqError::InvalidArg(format!("invalid endpoint '{raw}': {e}")))
}

impl Endpoints {
    /// Public production hosts.
    ///
    /// # Errors
    /// Never in practice; the constants are valid URLs.
    pub fn public() -> Result<Self, TidyqError> {
        Ok(Self {
            yahoo_history: parse(YAHOO_HISTORY)?,
            yahoo_quotes: parse(YAHOO_QUOTES)?,
            fred: parse(FRED)?,
            oanda: parse(OANDA)?,
            morningstar: parse(MORNINGSTAR)?,
            quandl: parse(QUANDL)?,
        })
    }

    /// Every endpoint under `base`, keeping the public paths.
    ///
    /// # Errors
    /// `InvalidArg` if `base` is not an absolute URL.
    pub fn local(base: &str) -> Result<Self, TidyqError> {
        let root = parse(&format!("{}/", base.trim_end_matches('/')))?;
        let join = |path: &str| {
            root.join(path)
                .map_err(|e| TidyqError::InvalidArg(format!("invalid endpoint path '{path}': {e}")))
        };
        Ok(Self {
            yahoo_history: join("v7/finance/download/")?,
            yahoo_quotes: join("d/quotes.csv")?,
            fred: join("graph/fredgraph.csv")?,
            oanda: join("cc-api/currencies")?,
            morningstar: join("ajax/exportKR2CSV.html")?,
            quandl: join("api/v3/")?,
        })
    }
}
