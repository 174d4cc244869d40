use reqwest::StatusCode;
use tidyq_core::TidyqError;
use url::Url;

use crate::NAME;

/// Thin GET wrapper mapping HTTP status codes onto `TidyqError`.
#[derive(Clone)]
pub(crate) struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub(crate) fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// GET `url` and return the body.
    ///
    /// `204 No Content` yields an empty body; `404` is `NotFound(what)`,
    /// `429` is `RateLimited` and any other non-success status an upstream fault.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tidyq::http",
            skip(self, url),
            fields(host = url.host_str().unwrap_or_default()),
        )
    )]
    pub(crate) async fn get_text(&self, url: Url, what: &str) -> Result<String, TidyqError> {
        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| TidyqError::upstream(NAME, format!("request for {what} failed: {e}")))?;

        let status = resp.status();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "tidyq::http", status = status.as_u16(), "response");
        match status {
            StatusCode::NO_CONTENT => return Ok(String::new()),
            StatusCode::NOT_FOUND => return Err(TidyqError::not_found(what)),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(TidyqError::RateLimited {
                    connector: NAME.to_string(),
                });
            }
            s if !s.is_success() => {
                return Err(TidyqError::upstream(NAME, format!("HTTP {s} for {what}")));
            }
            _ => {}
        }
        resp.text()
            .await
            .map_err(|e| TidyqError::upstream(NAME, format!("reading body for {what}: {e}")))
    }
}
