//! HTTP client for the headless CMS content API.
//!
//! Issues `GET {base}/{model}?apiKey=…&limit=…&offset=…[&query=…]` requests
//! and decodes the `{ results: [...] }` envelope. Transient failures (network
//! errors, 5xx, 429) are retried up to [`MAX_RETRIES`] times with a short
//! exponential backoff before the error is surfaced to the caller.

use std::time::Duration;

use tracing::debug;

use crate::error::ContentError;
use crate::model::{ContentItem, FetchOptions, ResultsEnvelope};

/// Automatic retries after the first attempt.
pub const MAX_RETRIES: u32 = 2;

/// Backoff before retry N is `250ms << N`.
const RETRY_BASE_DELAY_MS: u64 = 250;

/// CMS connection settings, injected at startup. The credential comes from
/// process configuration and is appended as the `apiKey` query parameter.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Content API base URL, without a trailing slash.
    pub base_url: String,
    /// API credential for the content space.
    pub api_key: String,
}

/// Client for one CMS content space.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    #[must_use]
    pub fn new(config: CmsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch all entries of a content model matching the given options.
    ///
    /// A 2xx response with a missing `results` key yields an empty list. A
    /// non-2xx response yields [`ContentError::Upstream`] with the status the
    /// CMS returned.
    pub async fn fetch_entries(
        &self,
        model: &str,
        options: &FetchOptions,
    ) -> Result<Vec<ContentItem>, ContentError> {
        let mut params = vec![
            ("apiKey", self.config.api_key.clone()),
            ("limit", options.limit_or_default().to_string()),
            ("offset", options.offset_or_default().to_string()),
        ];
        if let Some(query) = &options.query {
            params.push(("query", query.to_string()));
        }

        self.get_results(model, &params).await
    }

    /// Fetch a single entry by id.
    ///
    /// A no-op when `id` is `None` — no request is issued and `Ok(None)` is
    /// returned. Otherwise the first matching entry is returned, or `None`
    /// when the CMS has no entry with that id.
    pub async fn fetch_entry(
        &self,
        model: &str,
        id: Option<&str>,
    ) -> Result<Option<ContentItem>, ContentError> {
        let Some(id) = id else {
            return Ok(None);
        };

        let params = vec![
            ("apiKey", self.config.api_key.clone()),
            ("limit", "1".to_owned()),
            ("query", serde_json::json!({ "id": id }).to_string()),
        ];

        Ok(self.get_results(model, &params).await?.into_iter().next())
    }

    /// Issue the request with the retry policy applied.
    async fn get_results(
        &self,
        model: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<ContentItem>, ContentError> {
        let url = format!("{}/{model}", self.config.base_url.trim_end_matches('/'));

        let mut attempt: u32 = 0;
        loop {
            match self.get_once(&url, params).await {
                Ok(items) => return Ok(items),
                Err(err) if attempt < MAX_RETRIES && err.is_retryable() => {
                    let backoff = Duration::from_millis(RETRY_BASE_DELAY_MS << attempt);
                    debug!(
                        model,
                        attempt = attempt + 1,
                        max = MAX_RETRIES + 1,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "content fetch failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<ContentItem>, ContentError> {
        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Upstream { status });
        }

        let body = response.text().await?;
        let envelope: ResultsEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.results)
    }
}
